//! Fixture snapshot through the library pipeline, without the binary.

use freightlens_analysis::AnalysisPipeline;
use freightlens_core::FreightlensConfig;
use freightlens_io::{CsvSnapshotSource, DeliverySource};

#[test]
fn snapshot_diagnostics_and_hub_summaries() {
    let dataset = CsvSnapshotSource::from_dir(test_fixtures::snapshot_dir())
        .load()
        .unwrap();
    let output = AnalysisPipeline::new(&FreightlensConfig::default())
        .run(&dataset)
        .unwrap();

    let diagnostics = &output.diagnostics;
    assert_eq!(diagnostics.input_records, 15);
    assert_eq!(diagnostics.dropped_missing_timestamp, 2);
    assert_eq!(diagnostics.dropped_negative_delay, 1);
    assert_eq!(diagnostics.dropped_unresolved_geocode, 1);
    assert_eq!(diagnostics.retained_records, 11);
    assert_eq!(diagnostics.geocode_prefixes, 8);

    let records: Vec<(&str, usize, bool)> = output
        .report
        .hubs
        .iter()
        .map(|h| (h.hub.as_str(), h.records, h.skipped))
        .collect();
    assert_eq!(
        records,
        vec![
            ("SP", 7, false),
            ("RJ", 3, false),
            ("MG", 1, false),
            ("PR", 0, true),
            ("RS", 0, true),
        ]
    );

    // A single record has no variation at all.
    let mg = &output.report.hubs[2];
    assert!(mg.estimates.iter().all(|e| e.value == 0.0));
    assert!(output.report.findings.iter().all(|f| f.source != "MG"));
}
