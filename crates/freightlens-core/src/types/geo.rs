//! Coordinates and postal prefixes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A (latitude, longitude) pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// Postal code prefix used to join records against the geocode table.
///
/// Prefixes are compared in normalised form: surrounding whitespace and
/// leading zeros are dropped, so `"01037"` and `"1037"` are the same prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostalPrefix(String);

impl PostalPrefix {
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim();
        let stripped = trimmed.trim_start_matches('0');
        if stripped.is_empty() && !trimmed.is_empty() {
            Self("0".to_string())
        } else {
            Self(stripped.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for PostalPrefix {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for PostalPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
