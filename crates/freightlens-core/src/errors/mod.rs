//! Error handling for freightlens.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod estimation_error;
pub mod graph_error;
pub mod input_error;
pub mod pipeline_error;
pub mod report_error;

pub use config_error::ConfigError;
pub use error_code::FreightlensErrorCode;
pub use estimation_error::EstimationError;
pub use graph_error::GraphError;
pub use input_error::InputError;
pub use pipeline_error::PipelineError;
pub use report_error::ReportError;
