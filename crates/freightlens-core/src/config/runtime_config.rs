//! Execution configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Process hubs in parallel. Default: true.
    pub parallel: Option<bool>,
    /// Worker threads for parallel runs. Default: rayon's global pool.
    pub threads: Option<usize>,
}

impl RuntimeConfig {
    pub fn effective_parallel(&self) -> bool {
        self.parallel.unwrap_or(true)
    }
}
