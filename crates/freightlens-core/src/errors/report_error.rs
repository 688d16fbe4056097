//! Report writer errors.

use super::error_code::{self, FreightlensErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to serialize report: {0}")]
    Serialize(String),

    #[error("Failed to write report to {path}: {message}")]
    Write { path: String, message: String },
}

impl FreightlensErrorCode for ReportError {
    fn error_code(&self) -> &'static str {
        error_code::REPORT_ERROR
    }
}
