//! Causal graph errors.

use super::error_code::{self, FreightlensErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("cycle detected in causal graph: {path}")]
    CycleDetected { path: String },

    #[error("unknown variable: {name}")]
    UnknownVariable { name: String },
}

impl FreightlensErrorCode for GraphError {
    fn error_code(&self) -> &'static str {
        error_code::GRAPH_ERROR
    }
}
