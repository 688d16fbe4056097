//! Structured error codes.

/// Every error enum exposes a stable code string for logs and exit messages.
pub trait FreightlensErrorCode {
    /// Returns the error code string (e.g., "INPUT_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const INPUT_ERROR: &str = "INPUT_ERROR";
pub const GRAPH_ERROR: &str = "GRAPH_ERROR";
pub const ESTIMATION_ERROR: &str = "ESTIMATION_ERROR";
pub const UNIDENTIFIABLE: &str = "UNIDENTIFIABLE";
pub const REPORT_ERROR: &str = "REPORT_ERROR";
pub const RUNTIME_ERROR: &str = "RUNTIME_ERROR";
