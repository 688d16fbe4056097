//! Tests for the freightlens configuration system.

use std::path::PathBuf;
use std::sync::Mutex;

use freightlens_core::config::{CliOverrides, FreightlensConfig};
use freightlens_core::errors::ConfigError;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all FREIGHTLENS_ env vars to prevent cross-test contamination.
fn clear_env_vars() {
    for key in [
        "FREIGHTLENS_HUBS",
        "FREIGHTLENS_HIGH_ORDER_QUANTILE",
        "FREIGHTLENS_DATA_DIR",
        "FREIGHTLENS_OUTPUT_PATH",
        "FREIGHTLENS_PARALLEL",
        "FREIGHTLENS_THREADS",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("freightlens.toml"),
        r#"
[hypotheses]
hubs = ["SP", "MG"]

[output]
path = "project.json"

[runtime]
threads = 2
"#,
    )
    .unwrap();

    std::env::set_var("FREIGHTLENS_OUTPUT_PATH", "env.json");
    std::env::set_var("FREIGHTLENS_THREADS", "3");

    let cli = CliOverrides {
        threads: Some(8),
        ..Default::default()
    };
    let config = FreightlensConfig::load(dir.path(), Some(&cli)).unwrap();

    // Project file sets hubs, nothing overrides them.
    assert_eq!(config.hypotheses.effective_hubs(), vec!["SP", "MG"]);
    // Env overrides project.
    assert_eq!(config.output.effective_path(), PathBuf::from("env.json"));
    // CLI overrides env.
    assert_eq!(config.runtime.threads, Some(8));

    clear_env_vars();
}

#[test]
fn test_missing_project_file_falls_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempdir();
    let config = FreightlensConfig::load(dir.path(), None).unwrap();

    assert_eq!(
        config.hypotheses.effective_hubs(),
        vec!["SP", "RJ", "MG", "PR", "RS"]
    );
    assert_eq!(
        config.hypotheses.effective_far_states(),
        vec!["AM", "RR", "AP", "AC", "RO", "PA", "TO"]
    );
    assert_eq!(
        config.hypotheses.effective_neighbor_states(),
        vec!["MG", "PR", "RJ", "ES", "SC"]
    );
    assert_eq!(config.hypotheses.effective_weekend_days(), vec![5, 6]);
    assert_eq!(config.analysis.effective_earth_radius_km(), 6367.0);
    assert_eq!(config.analysis.effective_high_order_quantile(), 0.75);
    assert!(config.analysis.effective_proceed_when_unidentifiable());
    assert!(config.analysis.info_effect_tolerance.is_none());
    assert_eq!(
        config.output.effective_path(),
        PathBuf::from("causal_data_full.json")
    );
    assert_eq!(config.output.effective_indent(), 4);
    assert!(config.runtime.effective_parallel());
}

#[test]
fn test_env_hub_list_is_split_and_trimmed() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    std::env::set_var("FREIGHTLENS_HUBS", " SP, RJ ,,PR");
    let dir = tempdir();
    let config = FreightlensConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.hypotheses.effective_hubs(), vec!["SP", "RJ", "PR"]);

    clear_env_vars();
}

#[test]
fn test_invalid_project_toml_is_a_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempdir();
    std::fs::write(dir.path().join("freightlens.toml"), "[analysis\nbroken").unwrap();
    let result = FreightlensConfig::load(dir.path(), None);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn test_validation_rejects_bad_values() {
    let cases = [
        ("[analysis]\nhigh_order_quantile = 1.5", "analysis.high_order_quantile"),
        ("[analysis]\nearth_radius_km = -1.0", "analysis.earth_radius_km"),
        ("[analysis]\ninfo_effect_tolerance = -0.1", "analysis.info_effect_tolerance"),
        ("[hypotheses]\nweekend_days = [5, 7]", "hypotheses.weekend_days"),
        ("[hypotheses]\nhubs = [\"SP\", \"SP\"]", "hypotheses.hubs"),
        ("[runtime]\nthreads = 0", "runtime.threads"),
    ];
    for (toml_str, expected_field) in cases {
        let config = FreightlensConfig::from_toml(toml_str).unwrap();
        match FreightlensConfig::validate(&config) {
            Err(ConfigError::ValidationFailed { field, .. }) => {
                assert_eq!(field, expected_field, "wrong field for {toml_str}")
            }
            other => panic!("expected validation failure for {toml_str}, got {other:?}"),
        }
    }
}

#[test]
fn test_unknown_keys_are_ignored() {
    let config = FreightlensConfig::from_toml(
        r#"
[analysis]
high_order_quantile = 0.9
not_a_real_key = true
"#,
    )
    .unwrap();
    assert_eq!(config.analysis.effective_high_order_quantile(), 0.9);
}

#[test]
fn test_toml_round_trip_preserves_overrides() {
    let mut config = FreightlensConfig::default();
    config.hypotheses.hubs = vec!["RS".to_string()];
    config.analysis.info_effect_tolerance = Some(0.05);
    config.runtime.parallel = Some(false);

    let text = config.to_toml().unwrap();
    let parsed = FreightlensConfig::from_toml(&text).unwrap();
    assert_eq!(parsed.hypotheses.effective_hubs(), vec!["RS"]);
    assert_eq!(parsed.analysis.info_effect_tolerance, Some(0.05));
    assert!(!parsed.runtime.effective_parallel());
}

#[test]
fn test_input_paths_join_data_dir() {
    let config = FreightlensConfig::from_toml(
        r#"
[input]
data_dir = "snapshot"
orders_file = "olist_orders.csv"
"#,
    )
    .unwrap();
    assert_eq!(
        config.input.orders_path(),
        PathBuf::from("snapshot").join("olist_orders.csv")
    );
    assert_eq!(
        config.input.geolocation_path(),
        PathBuf::from("snapshot").join("geolocation.csv")
    );
}
