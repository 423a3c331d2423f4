//! Configuration management for `FloodAid`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::{FloodAidError, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Upper bound for a single outbound weather call.
pub const MAX_TIMEOUT_SECONDS: u32 = 5;

/// Root configuration structure for `FloodAid`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FloodAidConfig {
    /// Weather and geocoding service settings
    pub weather: WeatherConfig,
    /// HTTP server settings
    pub server: ServerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Weather and geocoding service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Base URL for the place-name search service
    pub geocoding_url: String,
    /// Base URL for the forecast service
    pub forecast_url: String,
    /// Language code sent with geocoding lookups
    pub language: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: u32,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

// Default value functions
fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_timeout() -> u32 {
    MAX_TIMEOUT_SECONDS
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            forecast_url: default_forecast_url(),
            language: default_language(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl FloodAidConfig {
    /// Load configuration from `config_path`, or from the default file
    /// location when none is given, then apply environment overrides.
    /// An explicit path that does not exist is an error.
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = match config_path {
            Some(path) if !path.exists() => {
                return Err(FloodAidError::config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => path,
            None => Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml")),
        };

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // FLOODAID_SERVER__PORT=9000 style overrides
        builder = builder.add_source(
            Environment::with_prefix("FLOODAID")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder.build().map_err(|e| {
            FloodAidError::config(format!(
                "Failed to build configuration from {}: {e}",
                config_file.display()
            ))
        })?;

        let mut config: FloodAidConfig = settings
            .try_deserialize()
            .map_err(|e| FloodAidError::config(format!("Failed to deserialize configuration: {e}")))?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("floodaid").join("config.toml"))
    }

    /// Apply default values to fields left empty
    pub fn apply_defaults(&mut self) {
        if self.weather.geocoding_url.is_empty() {
            self.weather.geocoding_url = default_geocoding_url();
        }
        if self.weather.forecast_url.is_empty() {
            self.weather.forecast_url = default_forecast_url();
        }
        if self.weather.language.is_empty() {
            self.weather.language = default_language();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_timeout();
        }
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds == 0 {
            return Err(FloodAidError::config("Weather timeout must be at least 1 second"));
        }

        if self.weather.timeout_seconds > MAX_TIMEOUT_SECONDS {
            return Err(FloodAidError::config(format!(
                "Weather timeout cannot exceed {MAX_TIMEOUT_SECONDS} seconds"
            )));
        }

        if self.server.port == 0 {
            return Err(FloodAidError::config("Server port must be non-zero"));
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(FloodAidError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            )));
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(FloodAidError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            )));
        }

        for (name, url) in [
            ("geocoding", &self.weather.geocoding_url),
            ("forecast", &self.weather.forecast_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(FloodAidError::config(format!(
                    "The {name} URL must be a valid HTTP or HTTPS URL"
                )));
            }
        }

        if self.weather.language.trim().is_empty() {
            return Err(FloodAidError::config("Geocoding language cannot be blank"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = FloodAidConfig::default();
        assert_eq!(config.weather.geocoding_url, "https://geocoding-api.open-meteo.com/v1");
        assert_eq!(config.weather.forecast_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.weather.timeout_seconds, 5);
        assert_eq!(config.weather.language, "en");
        assert_eq!(config.server.port, 8501);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = FloodAidConfig::default();
        config.logging.level = "loud".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_timeout_budget() {
        let mut config = FloodAidConfig::default();
        config.weather.timeout_seconds = 30;
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("cannot exceed 5 seconds"));
    }

    #[test]
    fn test_config_validation_rejects_bad_url() {
        let mut config = FloodAidConfig::default();
        config.weather.forecast_url = "ftp://example.org".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("forecast URL"));
    }

    #[test]
    fn test_apply_defaults_fills_blanks() {
        let mut config = FloodAidConfig::default();
        config.weather.timeout_seconds = 0;
        config.logging.format = String::new();
        config.apply_defaults();
        assert_eq!(config.weather.timeout_seconds, 5);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = std::env::temp_dir().join(format!("floodaid-config-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[server]\nport = 9100\n\n[weather]\ntimeout_seconds = 3").unwrap();

        let config = FloodAidConfig::load_from_path(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.weather.timeout_seconds, 3);
        // untouched sections keep their defaults
        assert_eq!(config.weather.language, "en");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_missing_explicit_config_file_is_an_error() {
        let path = std::env::temp_dir().join("floodaid-no-such-dir/config.toml");
        let err = FloodAidConfig::load_from_path(Some(path)).unwrap_err();
        assert!(matches!(err, FloodAidError::Config { .. }));
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = FloodAidConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("floodaid"));
            assert!(path.to_string_lossy().ends_with("config.toml"));
        }
    }
}
