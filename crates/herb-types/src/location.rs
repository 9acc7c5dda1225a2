use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::validation::{check_range, Validate};

/// A point on the globe in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a point, rejecting latitudes outside ±90 and longitudes
    /// outside ±180.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, TypeError> {
        let point = Self {
            latitude,
            longitude,
        };
        point.validate()?;
        Ok(point)
    }

    /// Shift by a number of degrees on each axis. The result is not
    /// range-checked; it is meant for display waypoints near a real point.
    pub fn offset(&self, d_lat: f64, d_lon: f64) -> Self {
        Self {
            latitude: self.latitude + d_lat,
            longitude: self.longitude + d_lon,
        }
    }
}

impl Validate for GeoPoint {
    fn validate(&self) -> Result<(), TypeError> {
        check_range("latitude", self.latitude, -90.0, 90.0)?;
        check_range("longitude", self.longitude, -180.0, 180.0)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_extremes() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn rejects_bad_latitude() {
        let err = GeoPoint::new(91.0, 0.0).unwrap_err();
        assert!(matches!(err, TypeError::OutOfRange { field: "latitude", .. }));
    }

    #[test]
    fn rejects_bad_longitude() {
        let err = GeoPoint::new(0.0, -180.5).unwrap_err();
        assert!(matches!(err, TypeError::OutOfRange { field: "longitude", .. }));
    }

    #[test]
    fn offset_moves_both_axes() {
        let p = GeoPoint::new(27.58, 77.70).unwrap().offset(0.05, -0.05);
        assert!((p.latitude - 27.63).abs() < 1e-9);
        assert!((p.longitude - 77.65).abs() < 1e-9);
    }

    #[test]
    fn display_is_four_decimals() {
        let p = GeoPoint::new(9.49, 76.33).unwrap();
        assert_eq!(p.to_string(), "(9.4900, 76.3300)");
    }
}
