use std::fs;
use std::path::Path;

use herb_geo::GeofenceConfig;
use serde::{Deserialize, Serialize};

use crate::error::{SdkError, SdkResult};

/// Base URL of the journey page encoded into batch QR codes.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8501";

/// Everything a session can be configured with.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub geofence: GeofenceConfig,
    pub journey: JourneyConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JourneyConfig {
    pub base_url: String,
}

impl Default for JourneyConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl SessionConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> SdkResult<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| SdkError::Config(format!("reading {}: {e}", path.display())))?;
        let config = Self::from_toml_str(&contents)
            .map_err(|e| SdkError::Config(format!("{}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "loaded session config");
        Ok(config)
    }

    /// Parse configuration from TOML text. Omitted sections keep their
    /// defaults.
    pub fn from_toml_str(contents: &str) -> SdkResult<Self> {
        toml::from_str(contents).map_err(|e| SdkError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use herb_types::Species;

    use super::*;

    #[test]
    fn default_config() {
        let c = SessionConfig::default();
        assert_eq!(c.journey.base_url, "http://localhost:8501");
        assert_eq!(c.geofence.max_distance_km, 200.0);
        assert_eq!(c.geofence.zones.len(), 4);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let c = SessionConfig::from_toml_str(
            r#"
            [journey]
            base_url = "https://trace.example.org"
            "#,
        )
        .unwrap();
        assert_eq!(c.journey.base_url, "https://trace.example.org");
        assert_eq!(c.geofence, GeofenceConfig::default());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[geofence]
max_distance_km = 50.0

[[geofence.zones]]
species = "Tulsi"
latitude = 27.58
longitude = 77.70
"#
        )
        .unwrap();

        let c = SessionConfig::load(file.path()).unwrap();
        assert_eq!(c.geofence.max_distance_km, 50.0);
        assert_eq!(c.geofence.zones.len(), 1);
        assert_eq!(c.geofence.zones[0].species, Species::Tulsi);
        assert_eq!(c.journey, JourneyConfig::default());
    }

    #[test]
    fn missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SessionConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, SdkError::Config(_)));
    }

    #[test]
    fn malformed_file_is_config_error() {
        let err = SessionConfig::from_toml_str("[geofence]\nmax_distance_km = \"far\"").unwrap_err();
        assert!(matches!(err, SdkError::Config(_)));
    }
}
