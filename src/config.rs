//! Configuration management and validation.
//!
//! Provides the configuration structure shared by the classifier and the
//! CLI: which record keys carry the discriminator, station id, GeoJSON
//! properties and geometry, how deep a raw record may nest, and whether
//! rejected fields and unknown parameter ids are tolerated.

use crate::constants::{
    DEFAULT_MAX_DEPTH, GEOMETRY_KEY, PARAMETER_ID_KEY, PROPERTIES_KEY, STATION_ID_KEY,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Configuration for record classification and hydration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Record key holding the discriminator (parameter id)
    pub discriminator_key: String,

    /// Record key holding the station identifier
    pub station_key: String,

    /// GeoJSON key whose mapping is flattened into the record
    pub properties_key: String,

    /// GeoJSON key whose mapping is resolved into a geometry entity
    pub geometry_key: String,

    /// Deepest nesting accepted in a single record
    pub max_depth: usize,

    /// Fail on unknown discriminators and rejected fields instead of skipping
    pub strict: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            discriminator_key: PARAMETER_ID_KEY.to_string(),
            station_key: STATION_ID_KEY.to_string(),
            properties_key: PROPERTIES_KEY.to_string(),
            geometry_key: GEOMETRY_KEY.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            strict: false,
        }
    }
}

impl ProcessorConfig {
    /// Load configuration from a JSON file, filling missing keys with defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read config file '{}'", path.display()),
                e,
            )
        })?;

        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            Error::json(
                format!("Failed to parse config file '{}'", path.display()),
                e,
            )
        })?;

        debug!("Loaded configuration from {}: {:?}", path.display(), config);
        config.validate()?;
        Ok(config)
    }

    /// Use a different discriminator key
    pub fn with_discriminator_key(mut self, key: impl Into<String>) -> Self {
        self.discriminator_key = key.into();
        self
    }

    /// Use a different station key
    pub fn with_station_key(mut self, key: impl Into<String>) -> Self {
        self.station_key = key.into();
        self
    }

    /// Set the maximum record nesting depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enable strict mode
    pub fn with_strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Validate configuration values for consistency
    pub fn validate(&self) -> Result<()> {
        let keys = [
            ("discriminator_key", &self.discriminator_key),
            ("station_key", &self.station_key),
            ("properties_key", &self.properties_key),
            ("geometry_key", &self.geometry_key),
        ];

        for (name, value) in keys {
            if value.trim().is_empty() {
                return Err(Error::configuration(format!("{} cannot be empty", name)));
            }
        }

        if self.properties_key == self.geometry_key {
            return Err(Error::configuration(format!(
                "properties_key and geometry_key must differ (both '{}')",
                self.properties_key
            )));
        }

        if self.max_depth == 0 {
            return Err(Error::configuration(
                "max_depth must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = ProcessorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.discriminator_key, "parameterId");
        assert_eq!(config.station_key, "stationId");
        assert!(!config.strict);
    }

    #[test]
    fn test_builder_methods() {
        let config = ProcessorConfig::default()
            .with_discriminator_key("elementId")
            .with_max_depth(3)
            .with_strict();

        assert_eq!(config.discriminator_key, "elementId");
        assert_eq!(config.max_depth, 3);
        assert!(config.strict);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let config = ProcessorConfig::default().with_discriminator_key("  ");
        assert!(config.validate().is_err());

        let config = ProcessorConfig::default().with_max_depth(0);
        assert!(config.validate().is_err());

        let mut config = ProcessorConfig::default();
        config.geometry_key = config.properties_key.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"strict": true, "max_depth": 4}}"#).unwrap();

        let config = ProcessorConfig::from_file(file.path()).unwrap();
        assert!(config.strict);
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.discriminator_key, "parameterId");
    }

    #[test]
    fn test_from_file_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let result = ProcessorConfig::from_file(file.path());
        assert!(matches!(result, Err(Error::Json { .. })));
    }
}
