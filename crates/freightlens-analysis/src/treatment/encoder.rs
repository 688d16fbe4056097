//! Builds the outcome, confounder, and treatment columns for one hub.

use std::collections::HashSet;

use freightlens_core::config::HypothesisConfig;
use freightlens_core::constants::{DISTANCE_COLUMN, OUTCOME_COLUMN};
use freightlens_core::types::{DeliveryRecord, Effect};

use crate::estimation::{ColumnRef, Dataset};
use crate::features::item_counts;

/// Derives the four treatment indicators from a hub's records.
///
/// The far and neighbor sets are taken as configured; a state listed in both
/// sets is flagged as both.
#[derive(Debug, Clone)]
pub struct TreatmentEncoder {
    far_states: HashSet<String>,
    neighbor_states: HashSet<String>,
    weekend_days: HashSet<u8>,
}

impl TreatmentEncoder {
    pub fn new<S: Into<String>>(
        far_states: impl IntoIterator<Item = S>,
        neighbor_states: impl IntoIterator<Item = S>,
        weekend_days: impl IntoIterator<Item = u8>,
    ) -> Self {
        Self {
            far_states: far_states.into_iter().map(Into::into).collect(),
            neighbor_states: neighbor_states.into_iter().map(Into::into).collect(),
            weekend_days: weekend_days.into_iter().collect(),
        }
    }

    pub fn from_config(config: &HypothesisConfig) -> Self {
        Self::new(
            config.effective_far_states(),
            config.effective_neighbor_states(),
            config.effective_weekend_days(),
        )
    }

    /// Encode `records` (all from `hub`).
    ///
    /// Item frequencies for `is_high_order` are counted within `records`;
    /// `high_order_threshold` is the run-wide bar from the feature set.
    pub fn encode(
        &self,
        hub: &str,
        records: &[&DeliveryRecord],
        high_order_threshold: f64,
    ) -> TreatmentFrame {
        let local_counts = item_counts(records.iter().map(|r| r.order_item_id.as_str()));

        let mut frame = TreatmentFrame::with_capacity(hub, records.len(), high_order_threshold);
        for record in records {
            let frequency = local_counts
                .get(record.order_item_id.as_str())
                .copied()
                .unwrap_or(0) as f64;

            frame.outcome.push(record.delivery_delay_days as f64);
            frame.distance_km.push(record.distance_km);
            frame
                .is_far
                .push(self.far_states.contains(&record.customer_state));
            frame
                .is_neighbor
                .push(self.neighbor_states.contains(&record.customer_state));
            frame
                .is_weekend
                .push(self.weekend_days.contains(&record.purchase_weekday));
            frame
                .is_high_order
                .push(frequency >= high_order_threshold);
        }
        frame
    }
}

/// Column-oriented view of one hub, ready for estimation.
#[derive(Debug, Clone, PartialEq)]
pub struct TreatmentFrame {
    pub hub: String,
    pub high_order_threshold: f64,
    pub outcome: Vec<f64>,
    pub distance_km: Vec<f64>,
    pub is_far: Vec<bool>,
    pub is_neighbor: Vec<bool>,
    pub is_weekend: Vec<bool>,
    pub is_high_order: Vec<bool>,
}

impl TreatmentFrame {
    fn with_capacity(hub: &str, capacity: usize, high_order_threshold: f64) -> Self {
        Self {
            hub: hub.to_string(),
            high_order_threshold,
            outcome: Vec::with_capacity(capacity),
            distance_km: Vec::with_capacity(capacity),
            is_far: Vec::with_capacity(capacity),
            is_neighbor: Vec::with_capacity(capacity),
            is_weekend: Vec::with_capacity(capacity),
            is_high_order: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.outcome.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcome.is_empty()
    }

    /// Indicator column for a hypothesis.
    pub fn treatment(&self, effect: Effect) -> &[bool] {
        match effect {
            Effect::Distance => &self.is_far,
            Effect::Hub => &self.is_neighbor,
            Effect::Weekend => &self.is_weekend,
            Effect::HighOrder => &self.is_high_order,
        }
    }
}

impl Dataset for TreatmentFrame {
    fn n_rows(&self) -> usize {
        self.len()
    }

    fn column(&self, name: &str) -> Option<ColumnRef<'_>> {
        match name {
            OUTCOME_COLUMN => Some(ColumnRef::Numeric(&self.outcome)),
            DISTANCE_COLUMN => Some(ColumnRef::Numeric(&self.distance_km)),
            _ => Effect::ALL
                .iter()
                .find(|e| e.treatment_column() == name)
                .map(|e| ColumnRef::Indicator(self.treatment(*e))),
        }
    }
}
