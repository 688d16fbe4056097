//! Property tests for distance, quantile, regression, and classification.

use proptest::prelude::*;

use freightlens_analysis::estimation::fit_ols;
use freightlens_analysis::features::quantile_linear;
use freightlens_analysis::findings::SIGN_NOISE_FLOOR;
use freightlens_analysis::{FindingClassifier, GeoDistance};
use freightlens_core::types::{Coordinates, Effect, FindingType};

fn coordinates() -> impl Strategy<Value = Coordinates> {
    (-90.0_f64..90.0, -180.0_f64..180.0).prop_map(|(lat, lng)| Coordinates::new(lat, lng))
}

proptest! {
    #[test]
    fn distance_is_symmetric_and_bounded(a in coordinates(), b in coordinates()) {
        let geo = GeoDistance::default();
        let ab = geo.distance(Some(a), Some(b)).unwrap();
        let ba = geo.distance(Some(b), Some(a)).unwrap();
        prop_assert!(ab >= 0.0);
        prop_assert!((ab - ba).abs() < 1e-6);
        prop_assert!(ab <= std::f64::consts::PI * geo.radius_km() + 1e-6);
    }

    #[test]
    fn distance_to_self_is_zero(a in coordinates()) {
        let d = GeoDistance::default().distance(Some(a), Some(a)).unwrap();
        prop_assert!(d.abs() < 1e-9);
    }

    #[test]
    fn quantile_stays_within_range(
        values in prop::collection::vec(0.0_f64..1000.0, 1..50),
        q in 0.0_f64..=1.0,
    ) {
        let result = quantile_linear(&values, q);
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(result >= min - 1e-9 && result <= max + 1e-9);
    }

    #[test]
    fn quantile_is_monotone_in_q(
        values in prop::collection::vec(0.0_f64..1000.0, 1..50),
        q1 in 0.0_f64..=1.0,
        q2 in 0.0_f64..=1.0,
    ) {
        let (lo, hi) = if q1 <= q2 { (q1, q2) } else { (q2, q1) };
        prop_assert!(quantile_linear(&values, lo) <= quantile_linear(&values, hi) + 1e-9);
    }

    #[test]
    fn ols_recovers_noise_free_slopes(
        slope in -10.0_f64..10.0,
        confounder_slope in -0.1_f64..0.1,
        intercept in -5.0_f64..20.0,
    ) {
        let treatment: Vec<f64> = (0..30).map(|i| ((i * 7) % 3 == 0) as u8 as f64).collect();
        let distance: Vec<f64> = (0..30).map(|i| 50.0 + ((i * 13) % 17) as f64 * 40.0).collect();
        let y: Vec<f64> = treatment
            .iter()
            .zip(&distance)
            .map(|(t, d)| intercept + slope * t + confounder_slope * d)
            .collect();
        let fit = fit_ols(&y, &[treatment, distance]);
        prop_assert!((fit.coefficients[0] - slope).abs() < 1e-6);
        prop_assert!((fit.coefficients[1] - confounder_slope).abs() < 1e-8);
    }

    #[test]
    fn classification_respects_sign_rules(value in -50.0_f64..50.0) {
        let classifier = FindingClassifier::default();
        for effect in Effect::ALL {
            let finding = classifier.classify("SP", effect, value);
            match effect {
                Effect::Distance => {
                    prop_assert_eq!(finding.is_some(), value > SIGN_NOISE_FLOOR);
                    if let Some(f) = finding {
                        prop_assert_eq!(f.finding_type, FindingType::Bad);
                        prop_assert!(f.val.starts_with('+'));
                    }
                }
                Effect::Hub => {
                    prop_assert_eq!(finding.is_some(), value < -SIGN_NOISE_FLOOR);
                    if let Some(f) = finding {
                        prop_assert_eq!(f.finding_type, FindingType::Good);
                    }
                }
                Effect::Weekend | Effect::HighOrder => {
                    prop_assert_eq!(finding.is_some(), value != 0.0);
                    if let Some(f) = finding {
                        prop_assert_eq!(f.finding_type, FindingType::Info);
                        prop_assert_eq!(f.val, format!("{value:.1}d"));
                    }
                }
            }
        }
    }
}
