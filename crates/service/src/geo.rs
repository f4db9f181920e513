//! Great-circle distance helpers for the nearby-merchant search.

/// Mean Earth radius used by the distance predicate.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Slack added to the radius so a point exactly on the boundary (or exactly at
/// the centre when the radius is zero) survives floating-point noise.
pub const DISTANCE_TOLERANCE_KM: f64 = 1e-9;

/// Haversine distance in kilometres between two (longitude, latitude) points in degrees.
pub fn haversine_km(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();
    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
}

pub fn within_km(lon1: f64, lat1: f64, lon2: f64, lat2: f64, radius_km: f64) -> bool {
    haversine_km(lon1, lat1, lon2, lat2) <= radius_km + DISTANCE_TOLERANCE_KM
}

/// Lat/lon rectangle that contains every point within `radius_km` of the centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    /// `None` when the box wraps the antimeridian or touches a pole.
    pub lon: Option<(f64, f64)>,
}

impl BoundingBox {
    pub fn around(lon: f64, lat: f64, radius_km: f64) -> Self {
        let d_lat = (radius_km / EARTH_RADIUS_KM).to_degrees();
        let min_lat = (lat - d_lat).max(-90.0);
        let max_lat = (lat + d_lat).min(90.0);

        let max_abs_lat = min_lat.abs().max(max_lat.abs());
        let lon_range = if max_abs_lat >= 90.0 {
            None
        } else {
            let d_lon = d_lat / max_abs_lat.to_radians().cos();
            let (lo, hi) = (lon - d_lon, lon + d_lon);
            if lo < -180.0 || hi > 180.0 { None } else { Some((lo, hi)) }
        };
        // widen by a hair so the SQL prefilter never drops a row the exact check keeps
        const PAD: f64 = 1e-9;
        Self {
            min_lat: min_lat - PAD,
            max_lat: max_lat + PAD,
            lon: lon_range.map(|(lo, hi)| (lo - PAD, hi + PAD)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_point_is_zero() {
        assert_eq!(haversine_km(116.397, 39.909, 116.397, 39.909), 0.0);
        assert!(within_km(116.397, 39.909, 116.397, 39.909, 0.0));
    }

    #[test]
    fn one_degree_of_latitude() {
        let d = haversine_km(0.0, 0.0, 0.0, 1.0);
        assert!((d - 111.195).abs() < 0.01, "got {d}");
    }

    #[test]
    fn beijing_to_shanghai() {
        // Tiananmen -> People's Square, ~1068 km
        let d = haversine_km(116.3975, 39.9087, 121.4737, 31.2304);
        assert!((d - 1068.0).abs() < 5.0, "got {d}");
    }

    #[test]
    fn bounding_box_contains_circle() {
        let bb = BoundingBox::around(104.06, 30.67, 10.0);
        let (lo, hi) = bb.lon.expect("no wrap near Chengdu");
        assert!(bb.min_lat < 30.67 && bb.max_lat > 30.67);
        assert!(lo < 104.06 && hi > 104.06);
        // a point 9.9 km due east must be inside the box
        let east = 104.06 + (9.9 / (EARTH_RADIUS_KM * 30.67_f64.to_radians().cos())).to_degrees();
        assert!(east < hi);
    }

    #[test]
    fn bounding_box_drops_lon_bound_at_antimeridian_and_pole() {
        assert!(BoundingBox::around(179.99, 0.0, 50.0).lon.is_none());
        assert!(BoundingBox::around(0.0, 89.99, 50.0).lon.is_none());
    }
}
