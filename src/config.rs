//! Configuration management for the `tempo-pt` dashboard backend
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::TempoError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TempoConfig {
    /// IPMA open-data API configuration
    #[serde(default)]
    pub ipma: IpmaConfig,
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default application settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// IPMA API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpmaConfig {
    /// Base URL of the IPMA open-data API
    #[serde(default = "default_ipma_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_ipma_timeout")]
    pub timeout_seconds: u32,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// HTTP server configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port the dashboard API listens on
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Directory with the prebuilt frontend bundle
    #[serde(default = "default_frontend_dir")]
    pub frontend_dir: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Default application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Locale used when rendering warning timestamps
    #[serde(default = "default_locale")]
    pub locale: String,
}

// Default value functions
fn default_ipma_base_url() -> String {
    "https://api.ipma.pt/open-data".to_string()
}

fn default_ipma_timeout() -> u32 {
    30
}

fn default_user_agent() -> String {
    format!("tempo-pt/{}", env!("CARGO_PKG_VERSION"))
}

fn default_server_port() -> u16 {
    8080
}

fn default_frontend_dir() -> String {
    "frontend/dist".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_locale() -> String {
    "pt-PT".to_string()
}

impl Default for IpmaConfig {
    fn default() -> Self {
        Self {
            base_url: default_ipma_base_url(),
            timeout_seconds: default_ipma_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
            frontend_dir: default_frontend_dir(),
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

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
        }
    }
}

impl TempoConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides with TEMPO_PT_ prefix
        builder = builder.add_source(
            Environment::with_prefix("TEMPO_PT")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: TempoConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tempo-pt").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.ipma.timeout_seconds == 0 {
            return Err(TempoError::config("IPMA API timeout must be at least 1 second").into());
        }

        if self.ipma.timeout_seconds > 300 {
            return Err(TempoError::config("IPMA API timeout cannot exceed 300 seconds").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TempoError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TempoError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.ipma.base_url.starts_with("http://") && !self.ipma.base_url.starts_with("https://")
        {
            return Err(
                TempoError::config("IPMA base URL must be a valid HTTP or HTTPS URL").into(),
            );
        }

        if self.defaults.locale.is_empty() {
            return Err(TempoError::config("Locale cannot be empty").into());
        }

        Ok(())
    }
}
