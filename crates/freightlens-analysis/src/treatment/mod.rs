//! Per-hub treatment indicators.

pub mod encoder;

pub use encoder::{TreatmentEncoder, TreatmentFrame};
