use freightlens_core::errors::InputError;
use freightlens_core::types::JoinedDataset;

use super::DeliverySource;

/// A source over an already-joined dataset.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    dataset: JoinedDataset,
}

impl InMemorySource {
    pub fn new(dataset: JoinedDataset) -> Self {
        Self { dataset }
    }
}

impl DeliverySource for InMemorySource {
    fn load(&self) -> Result<JoinedDataset, InputError> {
        Ok(self.dataset.clone())
    }
}
