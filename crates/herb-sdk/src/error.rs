use herb_geo::GeoError;
use herb_ledger::LedgerError;
use herb_store::StoreError;
use herb_types::{BatchId, Species, TypeError};
use thiserror::Error;

/// Errors surfaced to the presentation layer.
///
/// All of them are recoverable: the session is unchanged after any error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SdkError {
    #[error("invalid species: {0}")]
    InvalidSpecies(String),

    #[error("batch not found: {0}")]
    BatchNotFound(BatchId),

    #[error("{field} out of range: {value} not in {min}..={max}")]
    OutOfRangeInput {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Unknown choice value or malformed batch id.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("location is {distance_km:.1} km from the {species} zone (limit {max_distance_km} km)")]
    OutsideGeofence {
        species: Species,
        distance_km: f64,
        max_distance_km: f64,
    },

    #[error("batch already exists: {0}")]
    DuplicateBatch(BatchId),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type SdkResult<T> = Result<T, SdkError>;

impl From<TypeError> for SdkError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::InvalidSpecies(name) => SdkError::InvalidSpecies(name),
            TypeError::OutOfRange {
                field,
                value,
                min,
                max,
            } => SdkError::OutOfRangeInput {
                field,
                value,
                min,
                max,
            },
            other => SdkError::InvalidInput(other.to_string()),
        }
    }
}

impl From<StoreError> for SdkError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::BatchNotFound(id) => SdkError::BatchNotFound(id),
            StoreError::DuplicateBatch(id) => SdkError::DuplicateBatch(id),
            StoreError::Input(e) => e.into(),
        }
    }
}

impl From<GeoError> for SdkError {
    fn from(err: GeoError) -> Self {
        match err {
            GeoError::InvalidSpecies(name) => SdkError::InvalidSpecies(name),
            GeoError::InvalidConfig(msg) => SdkError::Config(msg),
            GeoError::Input(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_errors_keep_their_bounds() {
        let err: SdkError = TypeError::OutOfRange {
            field: "drying temperature",
            value: 120.0,
            min: 20.0,
            max: 100.0,
        }
        .into();
        assert_eq!(
            err,
            SdkError::OutOfRangeInput {
                field: "drying temperature",
                value: 120.0,
                min: 20.0,
                max: 100.0,
            }
        );
    }

    #[test]
    fn store_errors_map_by_kind() {
        let id = BatchId::parse("TUL-20250914-101500").unwrap();
        assert_eq!(
            SdkError::from(StoreError::BatchNotFound(id.clone())),
            SdkError::BatchNotFound(id.clone())
        );
        assert_eq!(
            SdkError::from(StoreError::DuplicateBatch(id.clone())),
            SdkError::DuplicateBatch(id)
        );
    }

    #[test]
    fn geo_species_error_is_invalid_species() {
        let err = SdkError::from(GeoError::InvalidSpecies("Mint".into()));
        assert_eq!(err, SdkError::InvalidSpecies("Mint".into()));
        assert_eq!(err.to_string(), "invalid species: Mint");
    }

    #[test]
    fn outside_geofence_message() {
        let err = SdkError::OutsideGeofence {
            species: Species::Neem,
            distance_km: 512.34,
            max_distance_km: 200.0,
        };
        assert_eq!(
            err.to_string(),
            "location is 512.3 km from the Neem zone (limit 200 km)"
        );
    }
}
