//! Report output configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Report file. Default: `causal_data_full.json`.
    pub path: Option<PathBuf>,
    /// JSON indentation width. Default: 4.
    pub indent: Option<usize>,
}

impl OutputConfig {
    pub fn effective_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_OUTPUT_PATH))
    }

    pub fn effective_indent(&self) -> usize {
        self.indent.unwrap_or(constants::DEFAULT_OUTPUT_INDENT)
    }
}
