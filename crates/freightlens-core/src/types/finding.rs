//! Findings emitted by the hypothesis runner.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The hypothesis a finding comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// Shipping to a far state.
    Distance,
    /// Shipping to a neighboring state.
    Hub,
    /// Purchase placed on a weekend day.
    Weekend,
    /// Item ordered frequently within the hub.
    HighOrder,
}

impl Effect {
    /// All hypotheses, in the order they are evaluated and reported.
    pub const ALL: [Effect; 4] = [
        Effect::Distance,
        Effect::Hub,
        Effect::Weekend,
        Effect::HighOrder,
    ];

    /// Name of the binary treatment column this hypothesis tests.
    pub fn treatment_column(&self) -> &'static str {
        match self {
            Self::Distance => "is_far",
            Self::Hub => "is_neighbor",
            Self::Weekend => "is_weekend",
            Self::HighOrder => "is_high_order",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Distance => "distance",
            Self::Hub => "hub",
            Self::Weekend => "weekend",
            Self::HighOrder => "high_order",
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a finding should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingType {
    Bad,
    Good,
    Info,
}

impl FindingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bad => "bad",
            Self::Good => "good",
            Self::Info => "info",
        }
    }
}

/// A classified effect estimate for one hub and hypothesis.
///
/// Serialises with exactly the keys `source`, `effect`, `val`, `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Hub code.
    pub source: String,
    pub effect: Effect,
    /// Effect in days, one decimal, e.g. `+2.3d` or `-0.4d`.
    pub val: String,
    #[serde(rename = "type")]
    pub finding_type: FindingType,
}
