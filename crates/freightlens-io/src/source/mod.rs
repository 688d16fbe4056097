//! Input collaborators.

mod csv_snapshot;
mod memory;
mod rows;
pub mod timestamp;

pub use csv_snapshot::CsvSnapshotSource;
pub use memory::InMemorySource;

use freightlens_core::errors::InputError;
use freightlens_core::types::JoinedDataset;

/// Produces the joined records the analysis runs on.
pub trait DeliverySource {
    fn load(&self) -> Result<JoinedDataset, InputError>;
}
