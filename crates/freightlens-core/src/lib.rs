//! # freightlens-core
//!
//! Foundation crate for the freightlens delivery-delay analysis.
//! Defines the record and finding types, configuration, errors, tracing
//! setup, and constants. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::FreightlensConfig;
pub use errors::{FreightlensErrorCode, PipelineError};
pub use types::{
    Coordinates, DeliveryRecord, Effect, Finding, FindingType, GeocodeObservation,
    JoinedDataset, JoinedOrderRecord, PostalPrefix,
};
