//! Estimation on encoded hub frames.

use freightlens_analysis::estimation::{ColumnRef, Dataset, IdentificationStatus};
use freightlens_analysis::{EffectEstimator, EstimandSpec, FeatureSet, TreatmentEncoder};
use freightlens_core::constants::{DEFAULT_HIGH_ORDER_QUANTILE, DISTANCE_COLUMN, OUTCOME_COLUMN};
use freightlens_core::types::Effect;
use test_fixtures::synthetic::{planted_hub, PlantedEffects};

fn frame(effects: PlantedEffects) -> freightlens_analysis::TreatmentFrame {
    let features = FeatureSet::from_records(planted_hub("SP", 280, effects), DEFAULT_HIGH_ORDER_QUANTILE);
    let records = features.hub_subset("SP");
    TreatmentEncoder::new(["AM"], ["PR"], [5, 6]).encode("SP", &records, features.high_order_threshold())
}

#[test]
fn frame_exposes_named_columns() {
    let frame = frame(PlantedEffects::default());
    assert_eq!(frame.n_rows(), 280);
    assert!(matches!(frame.column(OUTCOME_COLUMN), Some(ColumnRef::Numeric(v)) if v.len() == 280));
    assert!(matches!(frame.column(DISTANCE_COLUMN), Some(ColumnRef::Numeric(_))));
    for effect in Effect::ALL {
        assert!(matches!(
            frame.column(effect.treatment_column()),
            Some(ColumnRef::Indicator(_))
        ));
    }
    assert!(frame.column("unknown").is_none());

    // 70 of 280 rows per state, 80 weekend days, 40% hot item.
    let count = |effect| frame.treatment(effect).iter().filter(|&&b| b).count();
    assert_eq!(count(Effect::Distance), 70);
    assert_eq!(count(Effect::Hub), 70);
    assert_eq!(count(Effect::Weekend), 80);
    assert_eq!(count(Effect::HighOrder), 112);
}

#[test]
fn weekend_effect_is_recovered_after_distance_adjustment() {
    // Delay is exactly linear in weekend and distance here.
    let frame = frame(PlantedEffects {
        weekend: 2,
        ..Default::default()
    });
    let estimate = EffectEstimator::default()
        .estimate(&frame, &EstimandSpec::for_effect(Effect::Weekend))
        .unwrap();
    assert!((estimate.value - 2.0).abs() < 1e-6, "{}", estimate.value);
    assert_eq!(estimate.n_obs, 280);
    assert_eq!(estimate.estimand.status, IdentificationStatus::Unidentified);
    assert!(estimate.std_error.is_some());
}

#[test]
fn no_planted_effect_means_near_zero_estimates() {
    let frame = frame(PlantedEffects::default());
    let estimator = EffectEstimator::new(true, false);
    for effect in [Effect::Weekend, Effect::HighOrder] {
        let estimate = estimator
            .estimate(&frame, &EstimandSpec::for_effect(effect))
            .unwrap();
        assert!(estimate.value.abs() < 0.5, "{effect}: {}", estimate.value);
        assert!(estimate.estimand.is_identified());
    }
}
