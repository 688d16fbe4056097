//! Feature engineering: delay, coordinates, distance, weekday, and the
//! global high-order threshold.

pub mod builder;
pub mod geocode;
pub mod quantile;

pub use builder::{FeatureBuilder, FeatureDiagnostics, FeatureSet};
pub use geocode::GeocodeIndex;
pub use quantile::{item_counts, quantile_linear};
