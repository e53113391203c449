//! Engine configuration
//!
//! Strongly-typed configuration with serde support and sensible defaults.
//! Applications either build a config in code or load one from a TOML file;
//! missing fields fall back to their defaults in both cases.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for this schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window configuration
    pub window: WindowConfig,

    /// Mouse-look configuration
    pub mouse: MouseConfig,
}

impl EngineConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,

    /// Window width in pixels
    pub width: u32,

    /// Window height in pixels
    pub height: u32,

    /// Whether the window is resizable
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Kestrel Engine".to_string(),
            width: 800,
            height: 600,
            resizable: true,
        }
    }
}

/// Mouse-look configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MouseConfig {
    /// Minimum per-frame cursor delta magnitude that registers as look input
    ///
    /// Deltas below this are treated as sensor jitter and reported as zero by
    /// the input system's look query. Zero disables the deadzone.
    pub look_deadzone: f32,

    /// Degrees of rotation per pixel of cursor movement
    pub look_sensitivity: f32,
}

impl Default for MouseConfig {
    fn default() -> Self {
        Self {
            look_deadzone: 0.1,
            look_sensitivity: 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert!(config.window.resizable);
        assert!(config.mouse.look_deadzone > 0.0);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: EngineConfig = toml::from_str(
            r#"
            [window]
            title = "Demo"
            width = 1280

            [mouse]
            look_deadzone = 0.5
            "#,
        )
        .unwrap();

        assert_eq!(config.window.title, "Demo");
        assert_eq!(config.window.width, 1280);
        // unspecified fields keep their defaults
        assert_eq!(config.window.height, 600);
        assert_eq!(config.mouse.look_deadzone, 0.5);
        assert_eq!(config.mouse.look_sensitivity, 0.1);
    }

    #[test]
    fn test_parse_empty_toml() {
        let config: EngineConfig = toml::from_str("").unwrap();
        assert_eq!(config.window.title, "Kestrel Engine");
    }

    #[test]
    fn test_reject_malformed_toml() {
        let result: Result<EngineConfig, _> = toml::from_str("[window]\nwidth = \"wide\"");
        assert!(result.is_err());
    }
}
