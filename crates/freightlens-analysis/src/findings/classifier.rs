//! Sign rules that map an effect estimate to a finding.

use freightlens_core::config::AnalysisConfig;
use freightlens_core::types::{Effect, Finding, FindingType};

/// Magnitude, in days, below which a distance or hub estimate carries no sign.
///
/// Least squares on a design with no true effect still returns coefficients
/// around `1e-15`, which would otherwise flip between `+0.0d` bad and
/// `-0.0d` good findings.
pub const SIGN_NOISE_FLOOR: f64 = 1e-9;

/// Per-hypothesis rules for turning an effect into a finding.
///
/// | effect       | emitted when | type |
/// |--------------|--------------|------|
/// | `distance`   | `v > 0`      | bad  |
/// | `hub`        | `v < 0`      | good |
/// | `weekend`    | `v != 0`     | info |
/// | `high_order` | `v != 0`     | info |
///
/// The strict sign tests for distance and hub ignore magnitudes at or
/// below [`SIGN_NOISE_FLOOR`]. With an info tolerance set, weekend and
/// high-order effects must also exceed it in magnitude.
#[derive(Debug, Clone, Copy, Default)]
pub struct FindingClassifier {
    info_tolerance: Option<f64>,
}

impl FindingClassifier {
    pub fn new(info_tolerance: Option<f64>) -> Self {
        Self { info_tolerance }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.info_effect_tolerance)
    }

    pub fn classify(&self, hub: &str, effect: Effect, value: f64) -> Option<Finding> {
        if !value.is_finite() {
            return None;
        }
        let (finding_type, val) = match effect {
            Effect::Distance if value > SIGN_NOISE_FLOOR => {
                (FindingType::Bad, format!("+{}", format_days(value)))
            }
            Effect::Hub if value < -SIGN_NOISE_FLOOR => (FindingType::Good, format_days(value)),
            Effect::Weekend | Effect::HighOrder if self.is_informative(value) => {
                (FindingType::Info, format_days(value))
            }
            _ => return None,
        };
        Some(Finding {
            source: hub.to_string(),
            effect,
            val,
            finding_type,
        })
    }

    fn is_informative(&self, value: f64) -> bool {
        match self.info_tolerance {
            Some(tolerance) => value.abs() > tolerance,
            None => value != 0.0,
        }
    }
}

/// One decimal place with a `d` suffix: `2.34` → `2.3d`.
pub fn format_days(value: f64) -> String {
    format!("{value:.1}d")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(effect: Effect, value: f64) -> Option<Finding> {
        FindingClassifier::default().classify("SP", effect, value)
    }

    #[test]
    fn test_distance_positive_is_bad() {
        let finding = classify(Effect::Distance, 2.34).unwrap();
        assert_eq!(finding.val, "+2.3d");
        assert_eq!(finding.finding_type, FindingType::Bad);
        assert_eq!(finding.source, "SP");
        assert_eq!(finding.effect, Effect::Distance);
    }

    #[test]
    fn test_distance_non_positive_is_dropped() {
        assert!(classify(Effect::Distance, 0.0).is_none());
        assert!(classify(Effect::Distance, -1.5).is_none());
    }

    #[test]
    fn test_hub_negative_is_good() {
        let finding = classify(Effect::Hub, -1.26).unwrap();
        assert_eq!(finding.val, "-1.3d");
        assert_eq!(finding.finding_type, FindingType::Good);
        assert!(classify(Effect::Hub, 0.0).is_none());
        assert!(classify(Effect::Hub, 0.8).is_none());
    }

    #[test]
    fn test_weekend_and_high_order_any_nonzero_is_info() {
        let finding = classify(Effect::Weekend, -0.31).unwrap();
        assert_eq!(finding.val, "-0.3d");
        assert_eq!(finding.finding_type, FindingType::Info);

        let finding = classify(Effect::HighOrder, 0.004).unwrap();
        assert_eq!(finding.val, "0.0d");

        assert!(classify(Effect::Weekend, 0.0).is_none());
        assert!(classify(Effect::HighOrder, 0.0).is_none());
    }

    #[test]
    fn test_tolerance_filters_info_only() {
        let classifier = FindingClassifier::new(Some(0.05));
        assert!(classifier.classify("RJ", Effect::Weekend, 0.04).is_none());
        assert!(classifier.classify("RJ", Effect::HighOrder, -0.06).is_some());
        assert!(classifier.classify("RJ", Effect::Distance, 0.01).is_some());
    }

    #[test]
    fn test_rounding_noise_has_no_sign() {
        assert!(classify(Effect::Distance, 4.9e-15).is_none());
        assert!(classify(Effect::Hub, -3.4e-15).is_none());
        assert!(classify(Effect::Distance, 1e-6).is_some());

        let finding = classify(Effect::Weekend, 1.4e-15).unwrap();
        assert_eq!(finding.val, "0.0d");
        assert_eq!(finding.finding_type, FindingType::Info);
    }

    #[test]
    fn test_non_finite_is_dropped() {
        assert!(classify(Effect::Weekend, f64::NAN).is_none());
        assert!(classify(Effect::Distance, f64::INFINITY).is_none());
    }
}
