//! Harvest-location plausibility checks.
//!
//! Each species has one reference coordinate. A harvest point passes when
//! its great-circle distance to that coordinate is within the configured
//! radius (200 km by default).

pub mod distance;
pub mod error;
pub mod fence;
pub mod zones;

pub use distance::{haversine_km, EARTH_RADIUS_KM};
pub use error::GeoError;
pub use fence::{GeofenceChecker, GeofenceVerdict};
pub use zones::{GeofenceConfig, ReferenceZone, DEFAULT_MAX_DISTANCE_KM};
