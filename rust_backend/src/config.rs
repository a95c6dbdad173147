//! Configuration file support.
//!
//! Settings are read from a TOML file. Every section is optional:
//!
//! ```toml
//! [observation]
//! visibility_policy = "linear"     # or "wrap_aware"
//! fallback_utc_offset = 0.0
//!
//! [batch]
//! max_batch_size = 50
//! observable_only = false
//!
//! [catalog]
//! path = "data/bright_stars.json"
//!
//! [timezone]
//! mode = "table"                   # "longitude", "fixed" or "table"
//! fixed_offset = 0.0
//!
//! [[timezone.zones]]
//! name = "India"
//! min_longitude = 68.0
//! max_longitude = 97.5
//! offset_hours = 5.5
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use crate::algorithms::VisibilityPolicy;
use crate::core::error::{ObservationError, ObservationResult};
use crate::resolvers::{
    FixedOffsetResolver, LocalCatalog, LongitudeZoneResolver, TimezoneResolver, ZoneRule,
    ZoneTableResolver,
};
use crate::services::{ObservationService, ObservationSettings, DEFAULT_MAX_BATCH_SIZE};

/// Name of the configuration file searched by [`NovaScopeConfig::from_default_location`].
pub const CONFIG_FILE_NAME: &str = "novascope.toml";

/// Largest UTC offset in use anywhere (Line Islands).
const MAX_UTC_OFFSET: f64 = 14.0;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NovaScopeConfig {
    #[serde(default)]
    pub observation: ObservationSection,
    #[serde(default)]
    pub batch: BatchSection,
    #[serde(default)]
    pub catalog: CatalogSection,
    #[serde(default)]
    pub timezone: TimezoneSection,
    /// Directory of the file the configuration was read from; relative
    /// catalog paths are resolved against it.
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

/// Calculation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationSection {
    #[serde(default)]
    pub visibility_policy: VisibilityPolicy,
    #[serde(default)]
    pub fallback_utc_offset: f64,
}

impl Default for ObservationSection {
    fn default() -> Self {
        Self {
            visibility_policy: VisibilityPolicy::default(),
            fallback_utc_offset: 0.0,
        }
    }
}

/// Batch request settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSection {
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
    #[serde(default)]
    pub observable_only: bool,
}

fn default_max_batch_size() -> usize {
    DEFAULT_MAX_BATCH_SIZE
}

impl Default for BatchSection {
    fn default() -> Self {
        Self {
            max_batch_size: default_max_batch_size(),
            observable_only: false,
        }
    }
}

/// Star catalog location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSection {
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/bright_stars.json")
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

/// How the observer's UTC offset is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimezoneMode {
    /// One hour per 15 degrees of longitude
    #[default]
    Longitude,
    /// Always `fixed_offset`
    Fixed,
    /// First matching `[[timezone.zones]]` entry
    Table,
}

/// Timezone settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimezoneSection {
    #[serde(default)]
    pub mode: TimezoneMode,
    #[serde(default)]
    pub fixed_offset: f64,
    #[serde(default)]
    pub zones: Vec<ZoneRule>,
}

impl FromStr for NovaScopeConfig {
    type Err = ObservationError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let config: NovaScopeConfig = toml::from_str(content).map_err(|e| {
            ObservationError::Configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }
}

impl NovaScopeConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(NovaScopeConfig)` if successful
    /// * `Err(ObservationError::Configuration)` if the file cannot be read,
    ///   parsed or validated
    pub fn from_file<P: AsRef<Path>>(path: P) -> ObservationResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ObservationError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut config = Self::from_str(&content)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `novascope.toml` in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    ///
    /// # Returns
    /// * `Ok(NovaScopeConfig)` if found and parsed successfully
    /// * `Err(ObservationError::Configuration)` if no file was found or it is invalid
    pub fn from_default_location() -> ObservationResult<Self> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            Path::new("rust_backend").join(CONFIG_FILE_NAME),
            Path::new("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(ObservationError::Configuration(format!(
            "No {} found in standard locations",
            CONFIG_FILE_NAME
        )))
    }

    /// Check value ranges that the TOML types cannot express.
    pub fn validate(&self) -> ObservationResult<()> {
        if self.batch.max_batch_size == 0 {
            return Err(ObservationError::Configuration(
                "batch.max_batch_size must be at least 1".to_string(),
            ));
        }
        check_offset("observation.fallback_utc_offset", self.observation.fallback_utc_offset)?;
        check_offset("timezone.fixed_offset", self.timezone.fixed_offset)?;
        for zone in &self.timezone.zones {
            check_offset(&format!("timezone.zones '{}'", zone.name), zone.offset_hours)?;
        }
        if self.timezone.mode == TimezoneMode::Table && self.timezone.zones.is_empty() {
            return Err(ObservationError::Configuration(
                "timezone.mode = \"table\" requires at least one [[timezone.zones]] entry"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Settings for [`ObservationService`].
    pub fn observation_settings(&self) -> ObservationSettings {
        ObservationSettings {
            policy: self.observation.visibility_policy,
            fallback_utc_offset: self.observation.fallback_utc_offset,
            max_batch_size: self.batch.max_batch_size,
        }
    }

    /// Build the configured timezone resolver.
    pub fn timezone_resolver(&self) -> Arc<dyn TimezoneResolver> {
        match self.timezone.mode {
            TimezoneMode::Longitude => Arc::new(LongitudeZoneResolver),
            TimezoneMode::Fixed => Arc::new(FixedOffsetResolver::new(self.timezone.fixed_offset)),
            TimezoneMode::Table => Arc::new(ZoneTableResolver::new(self.timezone.zones.clone())),
        }
    }

    /// Catalog path, resolved against the configuration file's directory.
    pub fn catalog_path(&self) -> PathBuf {
        match &self.base_dir {
            Some(dir) if self.catalog.path.is_relative() => dir.join(&self.catalog.path),
            _ => self.catalog.path.clone(),
        }
    }

    /// Load the configured star catalog.
    pub fn load_catalog(&self) -> ObservationResult<LocalCatalog> {
        LocalCatalog::from_json_file(self.catalog_path())
    }

    /// Build a service over the configured catalog and timezone resolver.
    pub fn build_service(&self) -> ObservationResult<ObservationService> {
        let catalog = self.load_catalog()?;
        Ok(ObservationService::new(
            Arc::new(catalog),
            self.timezone_resolver(),
            self.observation_settings(),
        ))
    }
}

fn check_offset(field: &str, offset: f64) -> ObservationResult<()> {
    if offset.is_finite() && offset.abs() <= MAX_UTC_OFFSET {
        Ok(())
    } else {
        Err(ObservationError::Configuration(format!(
            "{} must be within +/-{} hours, got {}",
            field, MAX_UTC_OFFSET, offset
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = NovaScopeConfig::from_str("").unwrap();
        assert_eq!(config.observation.visibility_policy, VisibilityPolicy::Linear);
        assert_eq!(config.observation.fallback_utc_offset, 0.0);
        assert_eq!(config.batch.max_batch_size, 50);
        assert!(!config.batch.observable_only);
        assert_eq!(config.timezone.mode, TimezoneMode::Longitude);
        assert_eq!(config.catalog_path(), PathBuf::from("data/bright_stars.json"));
    }

    #[test]
    fn test_full_config() {
        let toml = r#"
            [observation]
            visibility_policy = "wrap_aware"
            fallback_utc_offset = 1.0

            [batch]
            max_batch_size = 10
            observable_only = true

            [timezone]
            mode = "table"

            [[timezone.zones]]
            name = "India"
            min_longitude = 68.0
            max_longitude = 97.5
            offset_hours = 5.5
        "#;
        let config: NovaScopeConfig = toml.parse().unwrap();
        let settings = config.observation_settings();
        assert_eq!(settings.policy, VisibilityPolicy::WrapAware);
        assert_eq!(settings.fallback_utc_offset, 1.0);
        assert_eq!(settings.max_batch_size, 10);
        assert!(config.batch.observable_only);
        assert_eq!(config.timezone.zones.len(), 1);
        assert_eq!(config.timezone.zones[0].min_latitude, -90.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(NovaScopeConfig::from_str("[batch]\nmax_batch_size = 0").is_err());
        assert!(NovaScopeConfig::from_str("[timezone]\nfixed_offset = 30.0").is_err());
        assert!(NovaScopeConfig::from_str("[timezone]\nmode = \"table\"").is_err());
        assert!(NovaScopeConfig::from_str("[observation]\nvisibility_policy = \"sometimes\"").is_err());
        assert!(NovaScopeConfig::from_str("not toml at all [").is_err());
    }

    #[tokio::test]
    async fn test_timezone_resolver_modes() {
        let fixed: NovaScopeConfig = "[timezone]\nmode = \"fixed\"\nfixed_offset = -3.5"
            .parse()
            .unwrap();
        let offset = fixed
            .timezone_resolver()
            .offset_for(0.0, 100.0, Utc::now())
            .await
            .unwrap();
        assert_eq!(offset, -3.5);

        let longitude = NovaScopeConfig::default();
        let offset = longitude
            .timezone_resolver()
            .offset_for(0.0, 100.0, Utc::now())
            .await
            .unwrap();
        assert_eq!(offset, 7.0);
    }

    #[test]
    fn test_from_file_resolves_catalog_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "[catalog]\npath = \"stars.json\"\n").unwrap();
        fs::write(
            dir.path().join("stars.json"),
            r#"{"stars": [{"name": "Vega", "raHours": 18.6156, "decDegrees": 38.7837}]}"#,
        )
        .unwrap();

        let config = NovaScopeConfig::from_file(&config_path).unwrap();
        assert_eq!(config.catalog_path(), dir.path().join("stars.json"));
        assert_eq!(config.load_catalog().unwrap().len(), 1);
        assert!(config.build_service().is_ok());
    }

    #[test]
    fn test_from_file_errors() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[batch]\nmax_batch_size = \"many\"").unwrap();
        let err = NovaScopeConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ObservationError::Configuration(_)));

        assert!(NovaScopeConfig::from_file("/nonexistent/novascope.toml").is_err());
    }

    #[test]
    fn test_missing_catalog_file() {
        let config: NovaScopeConfig = "[catalog]\npath = \"/nonexistent/stars.json\""
            .parse()
            .unwrap();
        assert!(matches!(
            config.load_catalog(),
            Err(ObservationError::Configuration(_))
        ));
    }
}
