use herb_types::GeoPoint;

/// Mean Earth radius (IUGG), in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Great-circle distance between two points on a spherical Earth.
pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn same_point_is_zero() {
        let tulsi = p(27.58, 77.70);
        assert_eq!(haversine_km(&tulsi, &tulsi), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        let d = haversine_km(&p(0.0, 0.0), &p(1.0, 0.0));
        assert!((d - 111.195).abs() < 0.01, "got {d}");
    }

    #[test]
    fn symmetric() {
        let a = p(24.47, 75.13);
        let b = p(9.49, 76.33);
        assert!((haversine_km(&a, &b) - haversine_km(&b, &a)).abs() < 1e-9);
    }

    #[test]
    fn delhi_to_tulsi_zone() {
        // New Delhi is roughly 120-130 km from the Tulsi reference point.
        let d = haversine_km(&p(28.61, 77.20), &p(27.58, 77.70));
        assert!(d > 110.0 && d < 140.0, "got {d}");
    }

    #[test]
    fn antipodes_are_half_circumference() {
        let d = haversine_km(&p(0.0, 0.0), &p(0.0, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }
}
