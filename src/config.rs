//! Configuration file handling for gesture-collector.
//!
//! Loads `<config dir>/gesture-collector/config.toml` (e.g.
//! `~/.config/gesture-collector/config.toml` on Linux). Every key is
//! optional; a missing file means defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::camera::{CameraSettings, Resolution};

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub device: u32,
    pub fps: u32,
    pub mirror: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device: 0,
            fps: 30,
            mirror: false,
        }
    }
}

/// Canonical sample dimensions.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DatasetConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            width: Resolution::VGA.width,
            height: Resolution::VGA.height,
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Keyboard poll timeout per rendered frame, in milliseconds
    pub poll_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { poll_ms: 10 }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// One of off, error, warn, info, debug, trace
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or the default location when `None`.
    ///
    /// Returns defaults if the file doesn't exist, and an error if it exists
    /// but cannot be read, parsed or validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
            path: path.clone(),
            source: e,
        })?;
        let config = Self::from_toml(&content).map_err(|e| match e {
            ConfigError::ParseError { source, .. } => ConfigError::ParseError {
                path: path.clone(),
                source,
            },
            ConfigError::Invalid { message, .. } => ConfigError::Invalid {
                path: path.clone(),
                message,
            },
            other => other,
        })?;
        Ok(config)
    }

    /// Parse and validate configuration text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: PathBuf::new(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: &str| ConfigError::Invalid {
            path: PathBuf::new(),
            message: message.to_string(),
        };
        if self.dataset.width == 0 || self.dataset.height == 0 {
            return Err(invalid("dataset width and height must be greater than 0"));
        }
        if self.camera.fps == 0 {
            return Err(invalid("camera fps must be greater than 0"));
        }
        if self.log_level().is_none() {
            return Err(invalid(&format!("unknown log level '{}'", self.log.level)));
        }
        Ok(())
    }

    /// Canonical sample resolution.
    pub fn canonical_resolution(&self) -> Resolution {
        Resolution::new(self.dataset.width, self.dataset.height)
    }

    /// Camera settings; the camera is asked for the canonical size.
    pub fn camera_settings(&self) -> CameraSettings {
        CameraSettings {
            device_index: self.camera.device,
            resolution: self.canonical_resolution(),
            fps: self.camera.fps,
            mirror: self.camera.mirror,
        }
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.display.poll_ms)
    }

    /// Parsed log level, `None` if the configured name is unknown.
    pub fn log_level(&self) -> Option<log::LevelFilter> {
        self.log.level.parse().ok()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", .path.display())]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid config file '{}': {message}", .path.display())]
    Invalid { path: PathBuf, message: String },
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("gesture-collector").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from(".gesture-collector.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.canonical_resolution(), Resolution::new(640, 480));
        assert_eq!(config.poll_timeout(), Duration::from_millis(10));
        assert_eq!(config.log_level(), Some(log::LevelFilter::Warn));
        let camera = config.camera_settings();
        assert_eq!(camera.device_index, 0);
        assert!(!camera.mirror);
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::from_toml(
            r#"
[camera]
device = 2
mirror = true

[dataset]
width = 64
"#,
        )
        .unwrap();
        assert_eq!(config.camera.device, 2);
        assert!(config.camera.mirror);
        assert_eq!(config.camera.fps, 30);
        assert_eq!(config.canonical_resolution(), Resolution::new(64, 480));
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let err = Config::from_toml("[dataset]\nwidth = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let err = Config::from_toml("[log]\nlevel = \"loud\"\n").unwrap_err();
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(matches!(
            Config::from_toml("[camera]\nresolution = \"640x480\"\n"),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load(Some(&tmp.path().join("nope.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_reports_path_on_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[camera\n").unwrap();
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }
}
