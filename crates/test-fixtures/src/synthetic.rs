//! Deterministic synthetic records.
//!
//! No randomness: every generator is a pure function of its arguments, so
//! tests and benches see identical data on every run.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use freightlens_core::types::{
    Coordinates, DeliveryRecord, GeocodeObservation, JoinedOrderRecord, PostalPrefix,
};

/// Customer states cycled through by [`planted_hub`]: far, neighbor, other, other.
pub const PLANTED_STATES: [&str; 4] = ["AM", "PR", "BA", "GO"];

/// Monday 2018-01-01 10:00.
pub fn base_timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2018, 1, 1)
        .and_then(|d| d.and_hms_opt(10, 0, 0))
        .expect("valid fixture date")
}

/// A single retained delivery.
pub fn delivery(
    order_id: &str,
    hub: &str,
    customer_state: &str,
    purchase: NaiveDateTime,
    delay_days: u32,
    distance_km: f64,
    order_item_id: &str,
) -> DeliveryRecord {
    use chrono::Datelike;
    DeliveryRecord {
        order_id: order_id.to_string(),
        hub_state: hub.to_string(),
        customer_state: customer_state.to_string(),
        purchase_timestamp: purchase,
        delivered_timestamp: purchase + TimeDelta::days(i64::from(delay_days)),
        delivery_delay_days: u64::from(delay_days),
        purchase_weekday: purchase.weekday().num_days_from_monday() as u8,
        seller_coordinates: Coordinates::new(-23.55, -46.63),
        customer_coordinates: Coordinates::new(-22.90, -43.20),
        distance_km,
        order_item_id: order_item_id.to_string(),
    }
}

/// Effects baked into [`planted_hub`] delays, in whole days.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlantedEffects {
    pub far: i64,
    pub neighbor: i64,
    pub weekend: i64,
    pub high_order: i64,
}

/// `n` deliveries from `hub` with known treatment effects.
///
/// - customer state cycles through [`PLANTED_STATES`] (period 4),
/// - purchases fall on consecutive days from a Monday (period 7),
/// - 40% of rows share the hub's most popular item, so with several hubs
///   of equal size only that item clears the 0.75 quantile bar,
/// - distance is a multiple of 500 km, plus 2000 km for far states,
/// - delay is `8 + effects + distance / 500`, always a whole number.
///
/// Use a multiple of 140 for `n` to get balanced cycles.
pub fn planted_hub(hub: &str, n: usize, effects: PlantedEffects) -> Vec<DeliveryRecord> {
    (0..n)
        .map(|i| {
            let state = PLANTED_STATES[i % PLANTED_STATES.len()];
            let is_far = i % 4 == 0;
            let is_neighbor = i % 4 == 1;
            let is_weekend = i % 7 >= 5;
            let tier = match i % 10 {
                0..=3 => 'a',
                4..=6 => 'b',
                7..=8 => 'c',
                _ => 'd',
            };
            let is_high_order = tier == 'a';

            let steps = ((i * 37) % 11) as i64;
            let distance_km = 500.0 * steps as f64 + if is_far { 2000.0 } else { 0.0 };

            let mut delay = 8 + steps + if is_far { 4 } else { 0 };
            if is_far {
                delay += effects.far;
            }
            if is_neighbor {
                delay += effects.neighbor;
            }
            if is_weekend {
                delay += effects.weekend;
            }
            if is_high_order {
                delay += effects.high_order;
            }

            let purchase = base_timestamp() + TimeDelta::days(i as i64);
            delivery(
                &format!("{hub}-order-{i}"),
                hub,
                state,
                purchase,
                delay.max(0) as u32,
                distance_km,
                &format!("{hub}-item-{tier}"),
            )
        })
        .collect()
}

/// A joined order row with both timestamps set.
pub fn joined_order(
    order_id: &str,
    hub: &str,
    seller_prefix: &str,
    customer_state: &str,
    customer_prefix: &str,
    purchase: NaiveDateTime,
    delay_days: i64,
    order_item_id: &str,
) -> JoinedOrderRecord {
    JoinedOrderRecord {
        order_id: order_id.to_string(),
        seller_id: format!("seller-{hub}"),
        hub_state: hub.to_string(),
        seller_prefix: PostalPrefix::new(seller_prefix),
        customer_id: format!("customer-{order_id}"),
        customer_state: customer_state.to_string(),
        customer_prefix: PostalPrefix::new(customer_prefix),
        purchase_timestamp: Some(purchase),
        delivered_timestamp: Some(purchase + TimeDelta::days(delay_days)),
        order_item_id: order_item_id.to_string(),
    }
}

pub fn geocode(prefix: &str, lat: f64, lng: f64) -> GeocodeObservation {
    GeocodeObservation {
        prefix: PostalPrefix::new(prefix),
        lat,
        lng,
    }
}
