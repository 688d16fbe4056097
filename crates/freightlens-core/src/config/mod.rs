//! Configuration system for freightlens.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod analysis_config;
pub mod freightlens_config;
pub mod hypothesis_config;
pub mod input_config;
pub mod output_config;
pub mod runtime_config;

pub use analysis_config::AnalysisConfig;
pub use freightlens_config::{CliOverrides, FreightlensConfig};
pub use hypothesis_config::HypothesisConfig;
pub use input_config::InputConfig;
pub use output_config::OutputConfig;
pub use runtime_config::RuntimeConfig;
