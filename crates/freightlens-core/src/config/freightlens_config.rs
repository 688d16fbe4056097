//! Top-level freightlens configuration with layered resolution.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{AnalysisConfig, HypothesisConfig, InputConfig, OutputConfig, RuntimeConfig};
use crate::errors::ConfigError;

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "freightlens.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`FREIGHTLENS_*`)
/// 3. Project config (`freightlens.toml` in project root)
/// 4. User config (`~/.freightlens/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FreightlensConfig {
    pub hypotheses: HypothesisConfig,
    pub analysis: AnalysisConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub runtime: RuntimeConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub data_dir: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub parallel: Option<bool>,
    pub threads: Option<usize>,
}

impl FreightlensConfig {
    /// Load configuration with layered resolution, then validate it.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &FreightlensConfig) -> Result<(), ConfigError> {
        let hubs = config.hypotheses.effective_hubs();
        let mut seen = HashSet::new();
        for hub in &hubs {
            if hub.trim().is_empty() {
                return Err(invalid("hypotheses.hubs", "hub codes must not be empty"));
            }
            if !seen.insert(hub.as_str()) {
                return Err(invalid(
                    "hypotheses.hubs",
                    &format!("duplicate hub code {hub}"),
                ));
            }
        }
        if config
            .hypotheses
            .effective_weekend_days()
            .iter()
            .any(|&day| day > 6)
        {
            return Err(invalid(
                "hypotheses.weekend_days",
                "weekday indices must be between 0 and 6",
            ));
        }
        let quantile = config.analysis.effective_high_order_quantile();
        if !(0.0..=1.0).contains(&quantile) {
            return Err(invalid(
                "analysis.high_order_quantile",
                "must be between 0.0 and 1.0",
            ));
        }
        let radius = config.analysis.effective_earth_radius_km();
        if !radius.is_finite() || radius <= 0.0 {
            return Err(invalid(
                "analysis.earth_radius_km",
                "must be a positive number",
            ));
        }
        if let Some(tolerance) = config.analysis.info_effect_tolerance {
            if !tolerance.is_finite() || tolerance < 0.0 {
                return Err(invalid(
                    "analysis.info_effect_tolerance",
                    "must be a non-negative number",
                ));
            }
        }
        if config.runtime.threads == Some(0) {
            return Err(invalid("runtime.threads", "must be greater than 0"));
        }
        Ok(())
    }

    /// Returns the user config path: `~/.freightlens/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".freightlens").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut FreightlensConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: FreightlensConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`. Scalars override when `Some`, lists when
    /// non-empty.
    fn merge(base: &mut FreightlensConfig, other: &FreightlensConfig) {
        // Hypotheses
        if !other.hypotheses.hubs.is_empty() {
            base.hypotheses.hubs = other.hypotheses.hubs.clone();
        }
        if !other.hypotheses.far_states.is_empty() {
            base.hypotheses.far_states = other.hypotheses.far_states.clone();
        }
        if !other.hypotheses.neighbor_states.is_empty() {
            base.hypotheses.neighbor_states = other.hypotheses.neighbor_states.clone();
        }
        if !other.hypotheses.weekend_days.is_empty() {
            base.hypotheses.weekend_days = other.hypotheses.weekend_days.clone();
        }

        // Analysis
        if other.analysis.earth_radius_km.is_some() {
            base.analysis.earth_radius_km = other.analysis.earth_radius_km;
        }
        if other.analysis.high_order_quantile.is_some() {
            base.analysis.high_order_quantile = other.analysis.high_order_quantile;
        }
        if other.analysis.proceed_when_unidentifiable.is_some() {
            base.analysis.proceed_when_unidentifiable =
                other.analysis.proceed_when_unidentifiable;
        }
        if other.analysis.assume_unobserved_confounders.is_some() {
            base.analysis.assume_unobserved_confounders =
                other.analysis.assume_unobserved_confounders;
        }
        if other.analysis.info_effect_tolerance.is_some() {
            base.analysis.info_effect_tolerance = other.analysis.info_effect_tolerance;
        }

        // Input
        if other.input.data_dir.is_some() {
            base.input.data_dir = other.input.data_dir.clone();
        }
        if other.input.orders_file.is_some() {
            base.input.orders_file = other.input.orders_file.clone();
        }
        if other.input.order_items_file.is_some() {
            base.input.order_items_file = other.input.order_items_file.clone();
        }
        if other.input.customers_file.is_some() {
            base.input.customers_file = other.input.customers_file.clone();
        }
        if other.input.sellers_file.is_some() {
            base.input.sellers_file = other.input.sellers_file.clone();
        }
        if other.input.geolocation_file.is_some() {
            base.input.geolocation_file = other.input.geolocation_file.clone();
        }

        // Output
        if other.output.path.is_some() {
            base.output.path = other.output.path.clone();
        }
        if other.output.indent.is_some() {
            base.output.indent = other.output.indent;
        }

        // Runtime
        if other.runtime.parallel.is_some() {
            base.runtime.parallel = other.runtime.parallel;
        }
        if other.runtime.threads.is_some() {
            base.runtime.threads = other.runtime.threads;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `FREIGHTLENS_DATA_DIR`, `FREIGHTLENS_HUBS=SP,RJ`, etc.
    fn apply_env_overrides(config: &mut FreightlensConfig) {
        if let Ok(val) = std::env::var("FREIGHTLENS_HUBS") {
            let hubs = split_list(&val);
            if !hubs.is_empty() {
                config.hypotheses.hubs = hubs;
            }
        }
        if let Ok(val) = std::env::var("FREIGHTLENS_HIGH_ORDER_QUANTILE") {
            if let Ok(v) = val.parse::<f64>() {
                config.analysis.high_order_quantile = Some(v);
            }
        }
        if let Ok(val) = std::env::var("FREIGHTLENS_DATA_DIR") {
            config.input.data_dir = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("FREIGHTLENS_OUTPUT_PATH") {
            config.output.path = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("FREIGHTLENS_PARALLEL") {
            if let Ok(v) = val.parse::<bool>() {
                config.runtime.parallel = Some(v);
            }
        }
        if let Ok(val) = std::env::var("FREIGHTLENS_THREADS") {
            if let Ok(v) = val.parse::<usize>() {
                config.runtime.threads = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut FreightlensConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.data_dir {
            config.input.data_dir = Some(v.clone());
        }
        if let Some(ref v) = cli.output_path {
            config.output.path = Some(v.clone());
        }
        if let Some(v) = cli.parallel {
            config.runtime.parallel = Some(v);
        }
        if let Some(v) = cli.threads {
            config.runtime.threads = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
