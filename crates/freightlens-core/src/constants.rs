//! Shared constants for the freightlens analysis.

/// freightlens version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Earth radius used by the haversine distance, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6367.0;

/// Quantile of per-item order counts above which an item is "high order".
pub const DEFAULT_HIGH_ORDER_QUANTILE: f64 = 0.75;

/// Fulfillment hubs analysed by default, in report order.
pub const DEFAULT_HUBS: &[&str] = &["SP", "RJ", "MG", "PR", "RS"];

/// Destination states considered far from every hub.
pub const DEFAULT_FAR_STATES: &[&str] = &["AM", "RR", "AP", "AC", "RO", "PA", "TO"];

/// Destination states considered neighbors of the hubs.
pub const DEFAULT_NEIGHBOR_STATES: &[&str] = &["MG", "PR", "RJ", "ES", "SC"];

/// Weekend weekday indices (Monday = 0).
pub const DEFAULT_WEEKEND_DAYS: &[u8] = &[5, 6];

/// Default report file name.
pub const DEFAULT_OUTPUT_PATH: &str = "causal_data_full.json";

/// Default JSON indentation width for the report.
pub const DEFAULT_OUTPUT_INDENT: usize = 4;

/// Default input file names inside the snapshot directory.
pub const DEFAULT_ORDERS_FILE: &str = "orders.csv";
pub const DEFAULT_ORDER_ITEMS_FILE: &str = "order_items.csv";
pub const DEFAULT_CUSTOMERS_FILE: &str = "customers.csv";
pub const DEFAULT_SELLERS_FILE: &str = "sellers.csv";
pub const DEFAULT_GEOLOCATION_FILE: &str = "geolocation.csv";

/// Outcome column produced by the treatment encoder.
pub const OUTCOME_COLUMN: &str = "delivery_delay";

/// Distance confounder column produced by the treatment encoder.
pub const DISTANCE_COLUMN: &str = "distance_km";

/// Name of the latent node standing in for unmeasured common causes.
pub const UNOBSERVED_CONFOUNDERS: &str = "unobserved_confounders";
