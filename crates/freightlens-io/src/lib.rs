//! # freightlens-io
//!
//! The two collaborators around the analysis: a source that produces the
//! joined order records and geocode observations, and a sink that persists
//! the ordered findings.

pub mod report;
pub mod source;

pub use report::{JsonReportWriter, ReportSink};
pub use source::{CsvSnapshotSource, DeliverySource, InMemorySource};
