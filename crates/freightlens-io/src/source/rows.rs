//! Serde row types for the snapshot files. Extra columns are ignored.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OrderRow {
    pub order_id: String,
    pub customer_id: String,
    pub order_purchase_timestamp: Option<String>,
    pub order_delivered_customer_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OrderItemRow {
    pub order_id: String,
    pub order_item_id: String,
    pub seller_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CustomerRow {
    pub customer_id: String,
    pub customer_zip_code_prefix: String,
    pub customer_state: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SellerRow {
    pub seller_id: String,
    pub seller_zip_code_prefix: String,
    pub seller_state: String,
}

/// Blank coordinates are missing data, not a malformed row.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GeolocationRow {
    pub geolocation_zip_code_prefix: String,
    pub geolocation_lat: Option<f64>,
    pub geolocation_lng: Option<f64>,
}
