//! Input collaborator errors. All of them abort the run.

use super::error_code::{self, FreightlensErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Input file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Malformed row in {path} (line {line}): {message}")]
    MalformedRow {
        path: String,
        line: u64,
        message: String,
    },
}

impl FreightlensErrorCode for InputError {
    fn error_code(&self) -> &'static str {
        error_code::INPUT_ERROR
    }
}
