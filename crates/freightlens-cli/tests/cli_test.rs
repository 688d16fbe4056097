//! End-to-end runs of the `freightlens` binary against the fixture snapshot.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn freightlens(home: &Path, args: &[&str]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_freightlens"));
    command.args(args).env("HOME", home).env("FREIGHTLENS_LOG", "off");
    for (key, _) in std::env::vars() {
        if key.starts_with("FREIGHTLENS_") && key != "FREIGHTLENS_LOG" {
            command.env_remove(key);
        }
    }
    command.output().unwrap()
}

#[test]
fn run_writes_ordered_report() {
    let dir = TempDir::new().unwrap();
    let report = dir.path().join("causal_data_full.json");
    let snapshot = test_fixtures::snapshot_dir();

    let output = freightlens(
        dir.path(),
        &[
            "run",
            "--root",
            dir.path().to_str().unwrap(),
            "--data-dir",
            snapshot.to_str().unwrap(),
            "--output",
            report.to_str().unwrap(),
        ],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Analysis complete"), "{stdout}");

    let text = fs::read_to_string(&report).unwrap();
    assert!(text.starts_with("[\n    {") || text == "[]", "{text}");
    let findings: Vec<serde_json::Value> = serde_json::from_str(&text).unwrap();

    let hub_rank = |hub: &str| ["SP", "RJ", "MG", "PR", "RS"].iter().position(|h| *h == hub);
    let effect_rank = |effect: &str| {
        ["distance", "hub", "weekend", "high_order"]
            .iter()
            .position(|e| *e == effect)
    };
    let mut ranks = Vec::new();
    for finding in &findings {
        let object = finding.as_object().unwrap();
        assert_eq!(object.len(), 4);
        let hub = hub_rank(object["source"].as_str().unwrap()).unwrap();
        let effect = effect_rank(object["effect"].as_str().unwrap()).unwrap();
        ranks.push((hub, effect));

        let val = object["val"].as_str().unwrap();
        assert!(val.ends_with('d'));
        match object["type"].as_str().unwrap() {
            "bad" => assert!(val.starts_with('+')),
            "good" => assert!(val.starts_with('-')),
            "info" => {}
            other => panic!("unexpected type {other}"),
        }
    }
    assert!(ranks.windows(2).all(|w| w[0] < w[1]), "{ranks:?}");

    let second = freightlens(
        dir.path(),
        &[
            "run",
            "--root",
            dir.path().to_str().unwrap(),
            "--data-dir",
            snapshot.to_str().unwrap(),
            "--output",
            report.to_str().unwrap(),
            "--sequential",
        ],
    );
    assert!(second.status.success());
    assert_eq!(fs::read_to_string(&report).unwrap(), text);
}

#[test]
fn run_fails_without_partial_report_when_input_is_missing() {
    let dir = TempDir::new().unwrap();
    let report = dir.path().join("out.json");
    let output = freightlens(
        dir.path(),
        &[
            "run",
            "--root",
            dir.path().to_str().unwrap(),
            "--data-dir",
            dir.path().join("nope").to_str().unwrap(),
            "--output",
            report.to_str().unwrap(),
        ],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("INPUT_ERROR"), "{stderr}");
    assert!(!report.exists());
}

#[test]
fn invalid_project_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("freightlens.toml"),
        "[analysis]\nhigh_order_quantile = 1.5\n",
    )
    .unwrap();
    let output = freightlens(dir.path(), &["config", "--root", dir.path().to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("CONFIG_ERROR"));
}

#[test]
fn config_prints_effective_toml() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("freightlens.toml"),
        "[hypotheses]\nhubs = [\"RJ\"]\n",
    )
    .unwrap();
    let output = freightlens(dir.path(), &["config", "--root", dir.path().to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[hypotheses]"), "{stdout}");
    assert!(stdout.contains("\"RJ\""), "{stdout}");
}
