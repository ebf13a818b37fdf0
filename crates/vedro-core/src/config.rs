use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;
use vedro_weather::provider::DEFAULT_BASE_URL;
use vedro_weather::{Coordinates, ProviderSettings, Units};

/// Environment variable consulted when no API key is configured
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// The forecast feed holds 40 three-hour samples
const FEED_LENGTH: usize = 40;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory (favorites live here too)
    pub config_dir: PathBuf,

    /// Weather API settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,

    /// Fixed position used for "weather here"
    #[serde(default)]
    pub location: LocationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API root
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// API key; falls back to `OPENWEATHER_API_KEY`
    #[serde(default)]
    pub api_key: Option<String>,

    /// Language of condition descriptions
    #[serde(default = "default_language")]
    pub language: String,

    /// Unit system requested from the API
    #[serde(default)]
    pub units: Units,

    /// Entries in the hourly strip
    #[serde(default = "default_hourly_count")]
    pub hourly_count: usize,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_language() -> String {
    "hr".to_string()
}

fn default_hourly_count() -> usize {
    8
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            api_key: None,
            language: default_language(),
            units: Units::default(),
            hourly_count: default_hourly_count(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl WeatherConfig {
    /// Configured key, else the environment variable
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|k| !k.trim().is_empty())
    }

    /// Provider settings, if an API key is available
    pub fn provider_settings(&self) -> Option<ProviderSettings> {
        let api_key = self.resolved_api_key()?;
        Some(ProviderSettings {
            base_url: self.api_base_url.clone(),
            api_key,
            language: self.language.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Dark mode enabled at startup
    #[serde(default)]
    pub dark_mode: bool,

    /// Animated background enabled at startup
    #[serde(default = "default_background_animation")]
    pub background_animation: bool,
}

fn default_background_animation() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            dark_mode: false,
            background_animation: default_background_animation(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationConfig {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LocationConfig {
    /// Both coordinates, or nothing
    pub fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates {
            latitude: self.latitude?,
            longitude: self.longitude?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
            weather: WeatherConfig::default(),
            ui: UiConfig::default(),
            location: LocationConfig::default(),
        }
    }
}

fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vedro")
}

impl Config {
    /// Load configuration from the default location, creating it if missing
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let mut config = Self::default();
            if let Some(parent) = path.parent() {
                config.config_dir = parent.to_path_buf();
            }
            config.save_to(path)?;
            tracing::info!("Created default configuration at {:?}", path);
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.weather.api_base_url, "weather.api_base_url", &mut result);

        if self.weather.resolved_api_key().is_none() {
            result.add_warning(
                "weather.api_key",
                format!("No API key configured and {} is not set", API_KEY_ENV),
            );
        }

        if self.weather.language.trim().is_empty() {
            result.add_warning("weather.language", "Language is empty, API default applies");
        }

        if self.weather.hourly_count == 0 {
            result.add_error("weather.hourly_count", "Hourly count must be greater than 0");
        } else if self.weather.hourly_count > FEED_LENGTH {
            result.add_warning(
                "weather.hourly_count",
                format!("The forecast feed only has {} entries", FEED_LENGTH),
            );
        }

        if self.weather.timeout_secs == 0 {
            result.add_error("weather.timeout_secs", "Timeout must be greater than 0");
        }

        match (self.location.latitude, self.location.longitude) {
            (None, None) => {}
            (Some(_), Some(_)) => {
                if let Some(coords) = self.location.coordinates() {
                    if vedro_weather::location::validate(coords).is_err() {
                        result.add_error(
                            "location",
                            format!(
                                "Coordinates out of range: {}, {}",
                                coords.latitude, coords.longitude
                            ),
                        );
                    }
                }
            }
            _ => result.add_warning(
                "location",
                "Both latitude and longitude are needed, location is ignored",
            ),
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("vedro");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_with_key() -> Config {
        let mut config = Config::default();
        config.weather.api_key = Some("key".to_string());
        config
    }

    #[test]
    fn test_valid_default_config() {
        let result = config_with_key().validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
    }

    #[test]
    fn test_invalid_url() {
        let mut config = config_with_key();
        config.weather.api_base_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "weather.api_base_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = config_with_key();
        config.weather.api_base_url = "ftp://api.openweathermap.org".to_string();
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_zero_hourly_count() {
        let mut config = config_with_key();
        config.weather.hourly_count = 0;
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "weather.hourly_count"));
    }

    #[test]
    fn test_location_checks() {
        let mut config = config_with_key();
        config.location.latitude = Some(45.8);
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "location"));

        config.location.longitude = Some(200.0);
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "location"));

        config.location.longitude = Some(15.9);
        assert!(config.validate().is_valid());
        assert!(config.location.coordinates().is_some());
    }

    #[test]
    fn test_configured_key_wins() {
        let config = config_with_key();
        assert_eq!(config.weather.resolved_api_key().as_deref(), Some("key"));
        let settings = config.weather.provider_settings().unwrap();
        assert_eq!(settings.language, "hr");
        assert_eq!(settings.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config.config_dir, dir.path());
        assert_eq!(config.weather.units, Units::Metric);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = config_with_key();
        config.config_dir = dir.path().to_path_buf();
        config.weather.units = Units::Imperial;
        config.ui.dark_mode = true;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.weather.units, Units::Imperial);
        assert!(loaded.ui.dark_mode);
        assert_eq!(loaded.weather.api_key.as_deref(), Some("key"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "config_dir = \"/tmp/vedro\"\n[ui]\ndark_mode = true\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.ui.dark_mode);
        assert!(config.ui.background_animation);
        assert_eq!(config.weather.hourly_count, 8);
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }
}
