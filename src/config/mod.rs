//! Configuration management.
//!
//! This module handles loading and saving the application configuration,
//! a TOML file in the platform config directory.

mod settings;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use settings::Settings;

/// Errors that can occur while handling configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("Could not determine the configuration directory")]
    NoConfigDir,

    /// The config file could not be read.
    #[error("Could not read config file: {0}")]
    ReadError(#[source] std::io::Error),

    /// The config file or its directory could not be written.
    #[error("Could not write config file: {0}")]
    WriteError(#[source] std::io::Error),

    /// The config file is not valid TOML.
    #[error("Could not parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The settings could not be serialized.
    #[error("Could not serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// The settings failed validation.
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// The loaded settings.
    pub settings: Settings,
}

impl Config {
    /// Load the configuration from the default location.
    ///
    /// A missing file yields the default configuration rather than an
    /// error, so a fresh install works without a setup step.
    pub fn load() -> Result<Self> {
        Self::load_from(&default_config_path()?)
    }

    /// Load the configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let settings: Settings = toml::from_str(&contents)?;

        let config = Self { settings };
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to an explicit path, creating parent
    /// directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::WriteError)?;
        }

        let contents = toml::to_string_pretty(&self.settings)?;
        std::fs::write(path, contents).map_err(ConfigError::WriteError)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        let url = &self.settings.server_url;
        if url.is_empty() {
            return Err(ConfigError::ValidationError(
                "server_url cannot be empty".to_string(),
            ));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "server_url '{}' must start with http:// or https://",
                url
            )));
        }
        if self.settings.tick_rate_ms == 0 {
            return Err(ConfigError::ValidationError(
                "tick_rate_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// The default config file path: `<config dir>/tix/config.toml`.
pub fn default_config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join("tix").join("config.toml"))
}
