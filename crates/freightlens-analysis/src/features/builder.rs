//! Turns joined order records into the immutable analysis set.

use chrono::{Datelike, TimeDelta};
use freightlens_core::config::AnalysisConfig;
use freightlens_core::constants::DEFAULT_HIGH_ORDER_QUANTILE;
use freightlens_core::types::{DeliveryRecord, JoinedDataset};
use serde::Serialize;

use super::geocode::GeocodeIndex;
use super::quantile::{item_counts, quantile_linear};
use crate::geo::GeoDistance;

/// Counts of what happened to the input rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeatureDiagnostics {
    pub input_records: usize,
    pub retained_records: usize,
    pub dropped_missing_timestamp: usize,
    pub dropped_negative_delay: usize,
    pub dropped_unresolved_geocode: usize,
    pub geocode_prefixes: usize,
}

/// Retained delivery records plus the run-wide high-order threshold.
///
/// Built once per run and never mutated afterwards; hubs read it through
/// shared references.
#[derive(Debug, Clone)]
pub struct FeatureSet {
    records: Vec<DeliveryRecord>,
    high_order_threshold: f64,
    diagnostics: FeatureDiagnostics,
}

impl FeatureSet {
    /// Wrap already-engineered records, computing the threshold over all of them.
    pub fn from_records(records: Vec<DeliveryRecord>, high_order_quantile: f64) -> Self {
        let high_order_threshold = high_order_threshold(&records, high_order_quantile);
        let diagnostics = FeatureDiagnostics {
            input_records: records.len(),
            retained_records: records.len(),
            ..Default::default()
        };
        Self {
            records,
            high_order_threshold,
            diagnostics,
        }
    }

    pub fn records(&self) -> &[DeliveryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Per-item count at or above which an item counts as high order.
    pub fn high_order_threshold(&self) -> f64 {
        self.high_order_threshold
    }

    pub fn diagnostics(&self) -> &FeatureDiagnostics {
        &self.diagnostics
    }

    /// Records shipped from `hub`, in dataset order.
    pub fn hub_subset(&self, hub: &str) -> Vec<&DeliveryRecord> {
        self.records.iter().filter(|r| r.hub_state == hub).collect()
    }
}

/// Quantile of per-item record counts over the whole retained set.
pub fn high_order_threshold(records: &[DeliveryRecord], quantile: f64) -> f64 {
    let counts: Vec<f64> = item_counts(records.iter().map(|r| r.order_item_id.as_str()))
        .into_values()
        .map(|c| c as f64)
        .collect();
    quantile_linear(&counts, quantile)
}

/// Derives delay, weekday, coordinates and distance for each joined record,
/// dropping rows that cannot be analysed.
#[derive(Debug, Clone)]
pub struct FeatureBuilder {
    geo: GeoDistance,
    high_order_quantile: f64,
}

impl FeatureBuilder {
    pub fn new(geo: GeoDistance, high_order_quantile: f64) -> Self {
        Self {
            geo,
            high_order_quantile,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(
            GeoDistance::new(config.effective_earth_radius_km()),
            config.effective_high_order_quantile(),
        )
    }

    pub fn build(&self, dataset: &JoinedDataset) -> FeatureSet {
        let geocodes = GeocodeIndex::aggregate(&dataset.geocodes);
        let mut diagnostics = FeatureDiagnostics {
            input_records: dataset.orders.len(),
            geocode_prefixes: geocodes.len(),
            ..Default::default()
        };

        let mut records = Vec::with_capacity(dataset.orders.len());
        for order in &dataset.orders {
            let (Some(purchased), Some(delivered)) =
                (order.purchase_timestamp, order.delivered_timestamp)
            else {
                diagnostics.dropped_missing_timestamp += 1;
                continue;
            };

            let delay = delivered - purchased;
            if delay < TimeDelta::zero() {
                diagnostics.dropped_negative_delay += 1;
                continue;
            }

            let seller = geocodes.lookup(&order.seller_prefix);
            let customer = geocodes.lookup(&order.customer_prefix);
            let (Some(seller), Some(customer), Some(distance_km)) =
                (seller, customer, self.geo.distance(seller, customer))
            else {
                diagnostics.dropped_unresolved_geocode += 1;
                continue;
            };

            records.push(DeliveryRecord {
                order_id: order.order_id.clone(),
                hub_state: order.hub_state.clone(),
                customer_state: order.customer_state.clone(),
                purchase_timestamp: purchased,
                delivered_timestamp: delivered,
                delivery_delay_days: delay.num_days().unsigned_abs(),
                purchase_weekday: purchased.weekday().num_days_from_monday() as u8,
                seller_coordinates: seller,
                customer_coordinates: customer,
                distance_km,
                order_item_id: order.order_item_id.clone(),
            });
        }

        diagnostics.retained_records = records.len();
        let high_order_threshold = high_order_threshold(&records, self.high_order_quantile);

        tracing::info!(
            input = diagnostics.input_records,
            retained = diagnostics.retained_records,
            missing_timestamp = diagnostics.dropped_missing_timestamp,
            negative_delay = diagnostics.dropped_negative_delay,
            unresolved_geocode = diagnostics.dropped_unresolved_geocode,
            high_order_threshold,
            "feature set built"
        );

        FeatureSet {
            records,
            high_order_threshold,
            diagnostics,
        }
    }
}

impl Default for FeatureBuilder {
    fn default() -> Self {
        Self::new(GeoDistance::default(), DEFAULT_HIGH_ORDER_QUANTILE)
    }
}
