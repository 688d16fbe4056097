//! Turns effect estimates into reportable findings.

mod classifier;

pub use classifier::{format_days, FindingClassifier, SIGN_NOISE_FLOOR};
