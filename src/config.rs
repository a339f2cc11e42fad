//! # Configuration Management Module
//!
//! Persistent application settings stored in platform-appropriate locations.
//! Handles loading, saving, and providing defaults for configuration options.
//!
//! ## Settings
//! - `api_base_url`: base URL of the NeuroGuard service
//! - `theme`: light/dark preference, injected into rendering at startup
//! - `poll_interval_ms`: live monitor polling cadence
//! - `window_capacity`: how many recent readings the chart view retains
//! - `latitude`/`longitude`: fixed device position for uploads
//!
//! ## Storage Location
//! - macOS: ~/Library/Application Support/neuroguard-desk/config.toml
//! - Linux: ~/.config/neuroguard-desk/config.toml
//! - Windows: %APPDATA%\neuroguard-desk\config.toml
//!
//! ## Why TOML
//! Human-readable format allows manual editing if needed. Serde provides
//! automatic serialization/deserialization.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Rendering theme preference, passed explicitly to the UI rather than read
/// from ambient state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_base_url: String,
    pub theme: ThemePreference,
    pub poll_interval_ms: u64,
    pub window_capacity: usize,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://neuroguard-z81r.onrender.com".to_string(),
            theme: ThemePreference::Light,
            poll_interval_ms: 500,
            window_capacity: 50,
            latitude: None,
            longitude: None,
        }
    }
}

impl Config {
    /// Get the path to the config file
    fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("neuroguard-desk").join("config.toml")
    }

    /// Load config from file, or create default if it doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        match fs::read_to_string(&path) {
            Ok(contents) => {
                let config = toml::from_str(&contents).map_err(ConfigError::ParseFailed)?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // File doesn't exist, create default
                let config = Self::default();
                config.save()?; // Save default config
                Ok(config)
            }
            Err(e) => Err(ConfigError::ReadFailed(e)),
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path();

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::WriteFailed)?;
        }

        let toml_string = toml::to_string_pretty(self).map_err(ConfigError::SerializeFailed)?;
        fs::write(&path, toml_string).map_err(ConfigError::WriteFailed)?;

        Ok(())
    }

    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, ThemePreference::Light);
        assert_eq!(config.poll_interval_ms, 500);
        assert_eq!(config.window_capacity, 50);
        assert!(config.latitude.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config.theme = ThemePreference::Dark;
        config.poll_interval_ms = 2000;

        let toml_str = toml::to_string(&config).expect("Failed to serialize");
        assert!(toml_str.contains("theme = \"dark\""));
        assert!(toml_str.contains("poll_interval_ms = 2000"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            api_base_url = "http://localhost:3000"
            theme = "dark"
            poll_interval_ms = 2000
            window_capacity = 10
            latitude = 40.4
            longitude = -3.7
        "#;

        let config: Config = toml::from_str(toml_str).expect("Failed to deserialize");
        assert_eq!(config.api_base_url, "http://localhost:3000");
        assert_eq!(config.theme, ThemePreference::Dark);
        assert_eq!(config.window_capacity, 10);
        assert_eq!(config.latitude, Some(40.4));
    }

    #[test]
    fn test_config_round_trip_on_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.window_capacity = 10;
        let toml_string = toml::to_string_pretty(&config).expect("serialize");
        fs::write(&path, toml_string).expect("write");

        let contents = fs::read_to_string(&path).expect("read");
        let loaded: Config = toml::from_str(&contents).expect("parse");
        assert_eq!(loaded.window_capacity, 10);
        assert_eq!(loaded.api_base_url, config.api_base_url);
    }

    #[test]
    fn test_poll_interval_conversion() {
        let config = Config::default();
        assert_eq!(config.poll_interval().as_millis(), 500);
    }
}
