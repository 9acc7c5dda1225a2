use herb_types::{GeoPoint, Species};
use serde::{Deserialize, Serialize};

/// Radius around a reference zone inside which harvests are accepted.
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 200.0;

/// The reference coordinate for one species.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferenceZone {
    pub species: Species,
    pub latitude: f64,
    pub longitude: f64,
}

impl ReferenceZone {
    pub fn new(species: Species, latitude: f64, longitude: f64) -> Self {
        Self {
            species,
            latitude,
            longitude,
        }
    }
}

/// Configuration for the geofence checker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeofenceConfig {
    /// Maximum accepted distance from the reference point.
    pub max_distance_km: f64,
    /// One entry per species. A species without an entry cannot be
    /// checked and fails with `InvalidSpecies`.
    pub zones: Vec<ReferenceZone>,
}

impl Default for GeofenceConfig {
    fn default() -> Self {
        Self {
            max_distance_km: DEFAULT_MAX_DISTANCE_KM,
            zones: vec![
                ReferenceZone::new(Species::Ashwagandha, 24.47, 75.13),
                ReferenceZone::new(Species::Tulsi, 27.58, 77.70),
                ReferenceZone::new(Species::Brahmi, 9.49, 76.33),
                ReferenceZone::new(Species::Neem, 26.29, 73.02),
            ],
        }
    }
}

impl GeofenceConfig {
    pub(crate) fn point_for(&self, species: Species) -> Option<GeoPoint> {
        self.zones
            .iter()
            .rev()
            .find(|z| z.species == species)
            .map(|z| GeoPoint {
                latitude: z.latitude,
                longitude: z.longitude,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_covers_every_species() {
        let config = GeofenceConfig::default();
        for species in Species::ALL.iter().copied() {
            assert!(config.point_for(species).is_some(), "{species} missing");
        }
        assert_eq!(config.max_distance_km, 200.0);
    }

    #[test]
    fn later_entry_wins() {
        let mut config = GeofenceConfig::default();
        config.zones.push(ReferenceZone::new(Species::Neem, 1.0, 2.0));
        let p = config.point_for(Species::Neem).unwrap();
        assert_eq!((p.latitude, p.longitude), (1.0, 2.0));
    }

    #[test]
    fn parses_from_toml_with_defaults() {
        let config: GeofenceConfig = toml::from_str("max_distance_km = 50.0").unwrap();
        assert_eq!(config.max_distance_km, 50.0);
        assert_eq!(config.zones.len(), 4);

        let custom: GeofenceConfig = toml::from_str(
            r#"
            [[zones]]
            species = "Tulsi"
            latitude = 10.0
            longitude = 20.0
            "#,
        )
        .unwrap();
        assert_eq!(custom.zones.len(), 1);
        assert!(custom.point_for(Species::Neem).is_none());
    }
}
