//! Record, geocode, and finding types shared across the workspace.

pub mod finding;
pub mod geo;
pub mod records;

pub use finding::{Effect, Finding, FindingType};
pub use geo::{Coordinates, PostalPrefix};
pub use records::{DeliveryRecord, GeocodeObservation, JoinedDataset, JoinedOrderRecord};
