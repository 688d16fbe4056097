use std::fs;
use std::path::{Path, PathBuf};

use freightlens_core::config::OutputConfig;
use freightlens_core::errors::ReportError;
use freightlens_core::types::Finding;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use super::ReportSink;

/// Writes findings as an indented JSON array.
///
/// The report goes to a hidden sibling file first and is renamed into place,
/// so readers never see a partial file.
#[derive(Debug, Clone)]
pub struct JsonReportWriter {
    path: PathBuf,
    indent: usize,
}

impl JsonReportWriter {
    pub fn new(path: impl Into<PathBuf>, indent: usize) -> Self {
        Self {
            path: path.into(),
            indent,
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(config.effective_path(), config.effective_indent())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render the report without touching the filesystem.
    pub fn render(&self, findings: &[Finding]) -> Result<Vec<u8>, ReportError> {
        let indent = " ".repeat(self.indent);
        let mut buf = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
        findings
            .serialize(&mut serializer)
            .map_err(|e| ReportError::Serialize(e.to_string()))?;
        Ok(buf)
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "report.json".to_string());
        self.path.with_file_name(format!(".{name}.tmp"))
    }

    fn write_error(&self, e: impl ToString) -> ReportError {
        ReportError::Write {
            path: self.path.display().to_string(),
            message: e.to_string(),
        }
    }
}

impl ReportSink for JsonReportWriter {
    fn write(&self, findings: &[Finding]) -> Result<(), ReportError> {
        let bytes = self.render(findings)?;
        let temp = self.temp_path();

        fs::write(&temp, &bytes).map_err(|e| self.write_error(e))?;
        if let Err(e) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(self.write_error(e));
        }

        tracing::info!(
            path = %self.path.display(),
            findings = findings.len(),
            "report written"
        );
        Ok(())
    }
}
