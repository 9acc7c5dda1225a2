use std::collections::BTreeMap;

use herb_types::{GeoPoint, Species, Validate};
use serde::Serialize;

use crate::distance::haversine_km;
use crate::error::GeoError;
use crate::zones::GeofenceConfig;

/// Outcome of checking one harvest point.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GeofenceVerdict {
    pub species: Species,
    pub point: GeoPoint,
    pub reference: GeoPoint,
    pub distance_km: f64,
    pub max_distance_km: f64,
    pub within_allowed: bool,
}

/// Checks harvest points against per-species reference zones.
#[derive(Clone, Debug)]
pub struct GeofenceChecker {
    max_distance_km: f64,
    zones: BTreeMap<Species, GeoPoint>,
}

impl GeofenceChecker {
    pub fn new(config: &GeofenceConfig) -> Result<Self, GeoError> {
        if !(config.max_distance_km.is_finite() && config.max_distance_km >= 0.0) {
            return Err(GeoError::InvalidConfig(format!(
                "max_distance_km must be a non-negative number, got {}",
                config.max_distance_km
            )));
        }

        let mut zones = BTreeMap::new();
        for species in Species::ALL.iter().copied() {
            if let Some(point) = config.point_for(species) {
                point.validate().map_err(|e| {
                    GeoError::InvalidConfig(format!("zone for {species}: {e}"))
                })?;
                zones.insert(species, point);
            }
        }

        Ok(Self {
            max_distance_km: config.max_distance_km,
            zones,
        })
    }

    pub fn max_distance_km(&self) -> f64 {
        self.max_distance_km
    }

    /// Reference coordinate of a species' zone. Also serves as the simulated
    /// device location offered to collectors.
    pub fn reference(&self, species: Species) -> Result<GeoPoint, GeoError> {
        self.zones
            .get(&species)
            .copied()
            .ok_or_else(|| GeoError::InvalidSpecies(species.to_string()))
    }

    /// Zones in species order.
    pub fn zones(&self) -> impl Iterator<Item = (Species, GeoPoint)> + '_ {
        self.zones.iter().map(|(s, p)| (*s, *p))
    }

    /// Distance from `point` to the species zone and whether it is close
    /// enough.
    pub fn check(&self, point: GeoPoint, species: Species) -> Result<GeofenceVerdict, GeoError> {
        point.validate()?;
        let reference = self.reference(species)?;
        let distance_km = haversine_km(&point, &reference);
        let within_allowed = distance_km <= self.max_distance_km;

        tracing::debug!(
            species = %species,
            distance_km,
            within_allowed,
            "geofence check"
        );

        Ok(GeofenceVerdict {
            species,
            point,
            reference,
            distance_km,
            max_distance_km: self.max_distance_km,
            within_allowed,
        })
    }

    /// Same as [`check`](Self::check) for raw operator input: parses the
    /// species name and range-checks the coordinates.
    pub fn check_raw(
        &self,
        latitude: f64,
        longitude: f64,
        species: &str,
    ) -> Result<GeofenceVerdict, GeoError> {
        let species: Species = species
            .parse()
            .map_err(|_| GeoError::InvalidSpecies(species.to_string()))?;
        let point = GeoPoint::new(latitude, longitude)?;
        self.check(point, species)
    }
}

impl Default for GeofenceChecker {
    fn default() -> Self {
        let config = GeofenceConfig::default();
        let zones = Species::ALL
            .iter()
            .copied()
            .filter_map(|s| config.point_for(s).map(|p| (s, p)))
            .collect();
        Self {
            max_distance_km: config.max_distance_km,
            zones,
        }
    }
}
