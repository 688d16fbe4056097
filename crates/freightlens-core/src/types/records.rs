//! Input and engineered delivery records.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::geo::{Coordinates, PostalPrefix};

/// One order item after the loader joined orders, items, customers and sellers.
///
/// Timestamps are `None` when the source value was empty or unparseable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedOrderRecord {
    pub order_id: String,
    pub seller_id: String,
    /// Seller state, i.e. the hub the order ships from.
    pub hub_state: String,
    pub seller_prefix: PostalPrefix,
    pub customer_id: String,
    pub customer_state: String,
    pub customer_prefix: PostalPrefix,
    pub purchase_timestamp: Option<NaiveDateTime>,
    pub delivered_timestamp: Option<NaiveDateTime>,
    pub order_item_id: String,
}

/// A single raw geocode row. Several rows may share a prefix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeObservation {
    pub prefix: PostalPrefix,
    pub lat: f64,
    pub lng: f64,
}

/// Everything the input collaborator hands to the analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JoinedDataset {
    pub orders: Vec<JoinedOrderRecord>,
    pub geocodes: Vec<GeocodeObservation>,
}

impl JoinedDataset {
    pub fn new(orders: Vec<JoinedOrderRecord>, geocodes: Vec<GeocodeObservation>) -> Self {
        Self { orders, geocodes }
    }
}

/// A delivery retained for analysis, with its engineered features.
///
/// Invariants: `delivered_timestamp >= purchase_timestamp`,
/// `distance_km >= 0`, and both coordinate pairs are resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    pub order_id: String,
    pub hub_state: String,
    pub customer_state: String,
    pub purchase_timestamp: NaiveDateTime,
    pub delivered_timestamp: NaiveDateTime,
    /// Whole days between purchase and delivery.
    pub delivery_delay_days: u64,
    /// Weekday of the purchase, Monday = 0.
    pub purchase_weekday: u8,
    pub seller_coordinates: Coordinates,
    pub customer_coordinates: Coordinates,
    pub distance_km: f64,
    pub order_item_id: String,
}
