//! Output collaborators.

mod json_writer;

pub use json_writer::JsonReportWriter;

use freightlens_core::errors::ReportError;
use freightlens_core::types::Finding;

/// Persists the ordered findings of a run.
pub trait ReportSink {
    fn write(&self, findings: &[Finding]) -> Result<(), ReportError>;
}
