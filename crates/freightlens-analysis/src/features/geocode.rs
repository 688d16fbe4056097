//! Geocode aggregation: one median coordinate per postal prefix.
//!
//! Raw geocode tables carry many noisy rows per prefix. The median of each
//! axis is robust to the occasional wildly misplaced entry.

use std::collections::HashMap;

use freightlens_core::types::{Coordinates, GeocodeObservation, PostalPrefix};
use statrs::statistics::{Data, Median};

/// Prefix → median coordinates.
#[derive(Debug, Clone, Default)]
pub struct GeocodeIndex {
    by_prefix: HashMap<PostalPrefix, Coordinates>,
}

impl GeocodeIndex {
    /// Group observations by prefix and take the median latitude and the
    /// median longitude independently. Non-finite rows are ignored.
    pub fn aggregate(observations: &[GeocodeObservation]) -> Self {
        let mut grouped: HashMap<&PostalPrefix, (Vec<f64>, Vec<f64>)> = HashMap::new();
        for obs in observations {
            if !obs.lat.is_finite() || !obs.lng.is_finite() {
                continue;
            }
            let entry = grouped.entry(&obs.prefix).or_default();
            entry.0.push(obs.lat);
            entry.1.push(obs.lng);
        }

        let by_prefix = grouped
            .into_iter()
            .map(|(prefix, (lats, lngs))| {
                let lat = Data::new(lats).median();
                let lng = Data::new(lngs).median();
                (prefix.clone(), Coordinates::new(lat, lng))
            })
            .collect();

        Self { by_prefix }
    }

    pub fn lookup(&self, prefix: &PostalPrefix) -> Option<Coordinates> {
        self.by_prefix.get(prefix).copied()
    }

    pub fn len(&self) -> usize {
        self.by_prefix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_prefix.is_empty()
    }
}
