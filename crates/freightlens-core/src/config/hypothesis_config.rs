//! Hub and treatment-set configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Which hubs to analyse and how the treatment indicators are defined.
///
/// Empty lists mean "use the compiled defaults".
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HypothesisConfig {
    /// Hub (seller state) codes, in report order.
    pub hubs: Vec<String>,
    /// Customer states treated as far.
    pub far_states: Vec<String>,
    /// Customer states treated as neighbors. May overlap `far_states`; nothing
    /// enforces exclusivity.
    pub neighbor_states: Vec<String>,
    /// Weekday indices (Monday = 0) treated as weekend.
    pub weekend_days: Vec<u8>,
}

impl HypothesisConfig {
    pub fn effective_hubs(&self) -> Vec<String> {
        or_defaults(&self.hubs, constants::DEFAULT_HUBS)
    }

    pub fn effective_far_states(&self) -> Vec<String> {
        or_defaults(&self.far_states, constants::DEFAULT_FAR_STATES)
    }

    pub fn effective_neighbor_states(&self) -> Vec<String> {
        or_defaults(&self.neighbor_states, constants::DEFAULT_NEIGHBOR_STATES)
    }

    pub fn effective_weekend_days(&self) -> Vec<u8> {
        if self.weekend_days.is_empty() {
            constants::DEFAULT_WEEKEND_DAYS.to_vec()
        } else {
            self.weekend_days.clone()
        }
    }
}

fn or_defaults(values: &[String], defaults: &[&str]) -> Vec<String> {
    if values.is_empty() {
        defaults.iter().map(|s| s.to_string()).collect()
    } else {
        values.to_vec()
    }
}
