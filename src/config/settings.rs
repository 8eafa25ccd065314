//! Application settings.

use serde::{Deserialize, Serialize};

/// The default ticket service URL.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3333";

/// The default event loop tick rate in milliseconds.
pub const DEFAULT_TICK_RATE_MS: u64 = 100;

/// User-configurable application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the ticket service.
    pub server_url: String,
    /// Event loop tick rate in milliseconds.
    pub tick_rate_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server_url, DEFAULT_SERVER_URL);
        assert_eq!(settings.tick_rate_ms, DEFAULT_TICK_RATE_MS);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: Settings = toml::from_str(r#"server_url = "http://tickets.internal""#)
            .unwrap();
        assert_eq!(settings.server_url, "http://tickets.internal");
        assert_eq!(settings.tick_rate_ms, DEFAULT_TICK_RATE_MS);
    }

    #[test]
    fn test_settings_round_trip() {
        let settings = Settings {
            server_url: "http://localhost:4000".to_string(),
            tick_rate_ms: 250,
        };
        let toml_str = toml::to_string(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, settings);
    }
}
