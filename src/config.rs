//! Configuration file support for the notch demo.
//!
//! A JSON file describes the slider (bounds, step, orientation) and the
//! props of its handle, plus the log verbosity.

use std::path::Path;

use notch_ui::HandleConfig;
use serde::{Deserialize, Serialize};

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Slider section of the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderConfig {
    #[serde(default)]
    pub min: f64,

    #[serde(default = "default_max")]
    pub max: f64,

    /// Keyboard increment; must be positive
    #[serde(default = "default_step")]
    pub step: f64,

    /// Initial value, clamped into `[min, max]`
    #[serde(default)]
    pub value: f64,

    #[serde(default)]
    pub vertical: bool,

    #[serde(default)]
    pub reverse: bool,

    #[serde(default)]
    pub disabled: bool,

    /// Handle props; orientation, offset and bounds are filled in by the slider
    #[serde(default)]
    pub handle: HandleConfig,
}

fn default_max() -> f64 {
    100.0
}

fn default_step() -> f64 {
    1.0
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: default_max(),
            step: default_step(),
            value: 0.0,
            vertical: false,
            reverse: false,
            disabled: false,
            handle: HandleConfig::default(),
        }
    }
}

impl SliderConfig {
    /// Check bounds and step.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min < self.max) {
            return Err(ConfigError::InvalidRange {
                min: self.min,
                max: self.max,
            });
        }
        if !(self.step > 0.0) {
            return Err(ConfigError::InvalidStep(self.step));
        }
        Ok(())
    }
}

/// Demo configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    #[serde(default)]
    pub slider: SliderConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            log_level: LogLevel::default(),
            slider: SliderConfig::default(),
        }
    }
}

impl AppConfig {
    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize and validate configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }
        config.slider.validate()?;

        Ok(config)
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// File could not be read
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Config file is from a newer version
    #[error("Configuration version {file_version} is newer than supported version {supported_version}")]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// Slider bounds are empty or inverted
    #[error("Invalid slider range: min {min} must be below max {max}")]
    InvalidRange { min: f64, max: f64 },

    /// Step is zero, negative or NaN
    #[error("Invalid slider step: {0}")]
    InvalidStep(f64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use notch_ui::TabIndex;

    #[test]
    fn defaults_from_minimal_json() {
        let config = AppConfig::from_json(r#"{"version": 1}"#).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Info);
    }

    #[test]
    fn handle_section_keeps_tab_index_states() {
        let json = r#"{
            "version": 1,
            "log_level": "debug",
            "slider": { "min": 10, "max": 20, "handle": { "tab_index": null, "class_name": "h" } }
        }"#;
        let config = AppConfig::from_json(json).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.slider.min, 10.0);
        assert_eq!(config.slider.handle.tab_index, TabIndex::Null);
        assert_eq!(config.slider.handle.class_name.as_deref(), Some("h"));
    }

    #[test]
    fn rejects_newer_version() {
        let err = AppConfig::from_json(r#"{"version": 99}"#).unwrap_err();
        assert!(matches!(err, ConfigError::VersionTooNew { file_version: 99, .. }));
    }

    #[test]
    fn rejects_bad_range_and_step() {
        let err = AppConfig::from_json(r#"{"version": 1, "slider": {"min": 5, "max": 5}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRange { .. }));

        let err = AppConfig::from_json(r#"{"version": 1, "slider": {"step": 0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidStep(_)));
    }

    #[test]
    fn json_roundtrip_preserves_config() {
        let mut config = AppConfig::default();
        config.slider.vertical = true;
        config.slider.handle.tab_index = TabIndex::Value(3);
        let parsed = AppConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = AppConfig::load(Path::new("/nonexistent/notch.json")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
