//! Haversine distance on a sphere.

use freightlens_core::constants::EARTH_RADIUS_KM;
use freightlens_core::types::Coordinates;

/// Great-circle distance in kilometres between two points on a sphere of
/// radius `radius_km`.
pub fn haversine_km(a: Coordinates, b: Coordinates, radius_km: f64) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = lat2 - lat1;
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1 for antipodal points.
    let c = 2.0 * h.clamp(0.0, 1.0).sqrt().asin();
    radius_km * c
}

/// Distance calculator with a fixed Earth radius.
#[derive(Debug, Clone, Copy)]
pub struct GeoDistance {
    radius_km: f64,
}

impl GeoDistance {
    pub fn new(radius_km: f64) -> Self {
        Self { radius_km }
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    /// Distance between two possibly unresolved points.
    ///
    /// Returns `None` when either side is missing or non-finite; callers drop
    /// such records rather than treating the distance as zero.
    pub fn distance(&self, a: Option<Coordinates>, b: Option<Coordinates>) -> Option<f64> {
        match (a, b) {
            (Some(a), Some(b)) if a.is_finite() && b.is_finite() => {
                Some(haversine_km(a, b, self.radius_km))
            }
            _ => None,
        }
    }
}

impl Default for GeoDistance {
    fn default() -> Self {
        Self::new(EARTH_RADIUS_KM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_points_are_zero() {
        let p = Coordinates::new(-23.55, -46.63);
        assert_eq!(haversine_km(p, p, EARTH_RADIUS_KM), 0.0);
    }

    #[test]
    fn test_one_degree_latitude_at_equator() {
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(1.0, 0.0);
        let expected = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0; // ~111.1 km
        let d = haversine_km(a, b, EARTH_RADIUS_KM);
        assert!((d - expected).abs() < 1e-9, "got {d}");
        assert!((d - 111.0).abs() < 1.0);
    }

    #[test]
    fn test_sao_paulo_to_rio() {
        let sp = Coordinates::new(-23.5505, -46.6333);
        let rj = Coordinates::new(-22.9068, -43.1729);
        let d = haversine_km(sp, rj, EARTH_RADIUS_KM);
        assert!((355.0..365.0).contains(&d), "got {d}");
    }

    #[test]
    fn test_unresolved_side_yields_none() {
        let geo = GeoDistance::default();
        let p = Some(Coordinates::new(1.0, 2.0));
        assert!(geo.distance(p, None).is_none());
        assert!(geo.distance(None, p).is_none());
        assert!(geo
            .distance(p, Some(Coordinates::new(f64::NAN, 0.0)))
            .is_none());
    }
}
