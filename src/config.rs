//! TOML-based application configuration.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Top-level application configuration parsed from TOML.
///
/// All fields have defaults matching the original Kuala Lumpur deployment.
/// Load from TOML with [`AppConfig::from_toml_file`] or use
/// [`AppConfig::default`]. Secrets (`GEMINI_API_KEY`, `RESEND_API_KEY`) are
/// read from the environment, never from this file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// HTTP server binding.
    pub server: ServerConfig,
    /// Default project location used for the weather forecast.
    pub location: LocationConfig,
    /// Weather provider settings.
    pub weather: WeatherConfig,
    /// Document-store seeding.
    pub store: StoreConfig,
    /// Contact-form mail routing.
    pub contact: ContactConfig,
    /// Chat-assistant settings.
    pub ai: AiConfig,
}

/// HTTP server binding.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Bind address.
    pub bind: String,
    /// Listen port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 5050,
        }
    }
}

/// Default project location used for the weather forecast.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocationConfig {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Human-readable location name returned with the forecast.
    pub name: String,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            latitude: 3.1412,
            longitude: 101.6865,
            name: "Kuala Lumpur".to_string(),
        }
    }
}

/// Weather provider settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeatherConfig {
    /// Open-Meteo forecast endpoint base URL.
    pub base_url: String,
    /// IANA timezone passed to the provider.
    pub timezone: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.open-meteo.com/v1/forecast".to_string(),
            timezone: "Asia/Singapore".to_string(),
        }
    }
}

/// Document-store seeding.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Path to the seed JSON file (array of `[PPA, UPFRONT]` documents).
    pub seed_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_path: "data/project_data.json".to_string(),
        }
    }
}

/// Contact-form mail routing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// Destination address for contact-form submissions.
    pub to_email: String,
    /// Sender address registered with the mail provider.
    pub from_email: String,
}

/// Chat-assistant settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AiConfig {
    /// Gemini model name.
    pub model: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-flash-latest".to_string(),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"location.latitude"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl AppConfig {
    /// Parses configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let loc = &self.location;
        if !(-90.0..=90.0).contains(&loc.latitude) {
            errors.push(ConfigError {
                field: "location.latitude".into(),
                message: "must be in [-90, 90]".into(),
            });
        }
        if !(-180.0..=180.0).contains(&loc.longitude) {
            errors.push(ConfigError {
                field: "location.longitude".into(),
                message: "must be in [-180, 180]".into(),
            });
        }
        if loc.name.trim().is_empty() {
            errors.push(ConfigError {
                field: "location.name".into(),
                message: "must not be empty".into(),
            });
        }

        if !self.weather.base_url.starts_with("http") {
            errors.push(ConfigError {
                field: "weather.base_url".into(),
                message: "must be an http(s) URL".into(),
            });
        }

        if self.store.seed_path.trim().is_empty() {
            errors.push(ConfigError {
                field: "store.seed_path".into(),
                message: "must not be empty".into(),
            });
        }

        errors
    }
}
