//! Great-circle distance between seller and customer.

pub mod haversine;

pub use haversine::{haversine_km, GeoDistance};
