//! Analysis configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Configuration for feature engineering and effect estimation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Earth radius for the haversine distance. Default: 6367 km.
    pub earth_radius_km: Option<f64>,
    /// Quantile of per-item order counts used as the high-order bar. Default: 0.75.
    pub high_order_quantile: Option<f64>,
    /// Estimate even when the backdoor criterion fails. Default: true.
    pub proceed_when_unidentifiable: Option<bool>,
    /// Model a latent common cause of treatment and outcome. Default: true.
    pub assume_unobserved_confounders: Option<bool>,
    /// Magnitude at or below which weekend/high-order effects are dropped.
    /// Unset keeps the exact `!= 0` test.
    pub info_effect_tolerance: Option<f64>,
}

impl AnalysisConfig {
    pub fn effective_earth_radius_km(&self) -> f64 {
        self.earth_radius_km.unwrap_or(constants::EARTH_RADIUS_KM)
    }

    pub fn effective_high_order_quantile(&self) -> f64 {
        self.high_order_quantile
            .unwrap_or(constants::DEFAULT_HIGH_ORDER_QUANTILE)
    }

    pub fn effective_proceed_when_unidentifiable(&self) -> bool {
        self.proceed_when_unidentifiable.unwrap_or(true)
    }

    pub fn effective_assume_unobserved_confounders(&self) -> bool {
        self.assume_unobserved_confounders.unwrap_or(true)
    }
}
