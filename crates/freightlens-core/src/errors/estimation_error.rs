//! Effect estimation errors.

use super::error_code::{self, FreightlensErrorCode};
use super::GraphError;

#[derive(Debug, thiserror::Error)]
pub enum EstimationError {
    #[error("dataset has no rows")]
    EmptyDataset,

    #[error("dataset has no column named {name}")]
    MissingColumn { name: String },

    #[error("column {name} has {actual} rows, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("column {name} holds a non-finite value at row {row}")]
    NonFiniteValue { name: String, row: usize },

    #[error("effect of {treatment} on {outcome} is not identifiable by backdoor adjustment")]
    Unidentifiable { treatment: String, outcome: String },

    #[error("causal graph error: {0}")]
    Graph(#[from] GraphError),
}

impl FreightlensErrorCode for EstimationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unidentifiable { .. } => error_code::UNIDENTIFIABLE,
            Self::Graph(e) => e.error_code(),
            _ => error_code::ESTIMATION_ERROR,
        }
    }
}
