//! Loads the five-file CSV snapshot and joins it into order records.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use freightlens_core::config::InputConfig;
use freightlens_core::errors::InputError;
use freightlens_core::types::{GeocodeObservation, JoinedDataset, JoinedOrderRecord, PostalPrefix};
use serde::de::DeserializeOwned;

use super::rows::{CustomerRow, GeolocationRow, OrderItemRow, OrderRow, SellerRow};
use super::timestamp::parse_timestamp;
use super::DeliverySource;

/// Reads orders, order items, customers, sellers, and geolocation CSVs.
///
/// Orders, items, customers, and sellers are inner-joined; the result has
/// one record per order-item row, in order-items file order.
#[derive(Debug, Clone)]
pub struct CsvSnapshotSource {
    orders: PathBuf,
    order_items: PathBuf,
    customers: PathBuf,
    sellers: PathBuf,
    geolocation: PathBuf,
}

impl CsvSnapshotSource {
    pub fn from_config(config: &InputConfig) -> Self {
        Self {
            orders: config.orders_path(),
            order_items: config.order_items_path(),
            customers: config.customers_path(),
            sellers: config.sellers_path(),
            geolocation: config.geolocation_path(),
        }
    }

    /// Default file names under `dir`.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self::from_config(&InputConfig {
            data_dir: Some(dir.into()),
            ..Default::default()
        })
    }

    fn join(
        orders: Vec<OrderRow>,
        items: Vec<OrderItemRow>,
        customers: Vec<CustomerRow>,
        sellers: Vec<SellerRow>,
    ) -> Vec<JoinedOrderRecord> {
        let orders = index_by(orders, |o| o.order_id.clone());
        let customers = index_by(customers, |c| c.customer_id.clone());
        let sellers = index_by(sellers, |s| s.seller_id.clone());

        let mut unmatched = 0usize;
        let mut unparsed_timestamps = 0usize;
        let mut joined = Vec::with_capacity(items.len());
        for item in items {
            let Some(order) = orders.get(&item.order_id) else {
                unmatched += 1;
                continue;
            };
            let (Some(customer), Some(seller)) =
                (customers.get(&order.customer_id), sellers.get(&item.seller_id))
            else {
                unmatched += 1;
                continue;
            };

            let purchase = timestamp_field(&order.order_purchase_timestamp, &mut unparsed_timestamps);
            let delivered =
                timestamp_field(&order.order_delivered_customer_date, &mut unparsed_timestamps);

            joined.push(JoinedOrderRecord {
                order_id: order.order_id.clone(),
                seller_id: seller.seller_id.clone(),
                hub_state: seller.seller_state.trim().to_string(),
                seller_prefix: PostalPrefix::new(&seller.seller_zip_code_prefix),
                customer_id: customer.customer_id.clone(),
                customer_state: customer.customer_state.trim().to_string(),
                customer_prefix: PostalPrefix::new(&customer.customer_zip_code_prefix),
                purchase_timestamp: purchase,
                delivered_timestamp: delivered,
                order_item_id: item.order_item_id,
            });
        }

        tracing::debug!(
            joined = joined.len(),
            unmatched,
            unparsed_timestamps,
            "snapshot joined"
        );
        joined
    }
}

impl DeliverySource for CsvSnapshotSource {
    fn load(&self) -> Result<JoinedDataset, InputError> {
        let orders: Vec<OrderRow> = read_rows(&self.orders)?;
        let items: Vec<OrderItemRow> = read_rows(&self.order_items)?;
        let customers: Vec<CustomerRow> = read_rows(&self.customers)?;
        let sellers: Vec<SellerRow> = read_rows(&self.sellers)?;
        let geolocation: Vec<GeolocationRow> = read_rows(&self.geolocation)?;

        let item_rows = items.len();
        let records = Self::join(orders, items, customers, sellers);
        let blank_coordinates = geolocation
            .iter()
            .filter(|row| row.geolocation_lat.is_none() || row.geolocation_lng.is_none())
            .count();
        // Blank coordinates become NaN, which geocode aggregation skips.
        let geocodes: Vec<GeocodeObservation> = geolocation
            .into_iter()
            .map(|row| GeocodeObservation {
                prefix: PostalPrefix::new(&row.geolocation_zip_code_prefix),
                lat: row.geolocation_lat.unwrap_or(f64::NAN),
                lng: row.geolocation_lng.unwrap_or(f64::NAN),
            })
            .collect();

        tracing::info!(
            item_rows,
            joined = records.len(),
            geocodes = geocodes.len(),
            blank_coordinates,
            "snapshot loaded"
        );
        Ok(JoinedDataset::new(records, geocodes))
    }
}

/// Deserialize every row of a headed CSV file.
fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, InputError> {
    if !path.is_file() {
        return Err(InputError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(|e| InputError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: T = result.map_err(|e| InputError::MalformedRow {
            path: path.display().to_string(),
            line: e.position().map(|p| p.line()).unwrap_or(0),
            message: e.to_string(),
        })?;
        rows.push(row);
    }
    Ok(rows)
}

/// First row wins on duplicate keys.
fn index_by<T>(rows: Vec<T>, key: impl Fn(&T) -> String) -> HashMap<String, T> {
    let mut index = HashMap::with_capacity(rows.len());
    for row in rows {
        index.entry(key(&row)).or_insert(row);
    }
    index
}

fn timestamp_field(raw: &Option<String>, unparsed: &mut usize) -> Option<chrono::NaiveDateTime> {
    let raw = raw.as_deref()?;
    let parsed = parse_timestamp(raw);
    if parsed.is_none() && !raw.trim().is_empty() {
        *unparsed += 1;
    }
    parsed
}
