use herb_types::TypeError;

/// Errors produced by geofence checks.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeoError {
    #[error("invalid species: no reference zone for {0}")]
    InvalidSpecies(String),

    #[error("invalid geofence configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Input(#[from] TypeError),
}
