//! Pipeline errors.

use super::error_code::{self, FreightlensErrorCode};
use super::{ConfigError, EstimationError, InputError, ReportError};

/// Errors that abort a run. Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Estimation error for hub {hub}, {effect}: {source}")]
    Estimation {
        hub: String,
        effect: String,
        #[source]
        source: EstimationError,
    },

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl FreightlensErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Input(e) => e.error_code(),
            Self::Estimation { source, .. } => source.error_code(),
            Self::Report(e) => e.error_code(),
            Self::Runtime(_) => error_code::RUNTIME_ERROR,
        }
    }
}
