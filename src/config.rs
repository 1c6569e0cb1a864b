//! Recognizer configuration
//!
//! Loaded from `gestures.toml` under `$XDG_CONFIG_HOME/kadi-gestures`
//! (or `~/.config/kadi-gestures`). Every key is optional.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};

/// Thresholds and timings for gesture recognition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    /// Minimum straight-line distance for a swipe (px)
    pub swipe_distance_threshold_px: f64,

    /// Minimum average speed for a swipe (px/ms)
    pub swipe_velocity_threshold: f64,

    /// Maximum gap between two taps for a double tap (ms)
    pub double_tap_window_ms: u64,

    /// Hold duration before long press fires (ms)
    pub long_press_delay_ms: u64,

    /// Wheel deltas below this emit swipe up
    pub wheel_up_threshold: f64,

    /// Wheel deltas above this emit swipe down
    pub wheel_down_threshold: f64,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            swipe_distance_threshold_px: 50.0,
            swipe_velocity_threshold: 0.3,
            double_tap_window_ms: 300,
            long_press_delay_ms: 500,
            wheel_up_threshold: -50.0,
            wheel_down_threshold: 50.0,
        }
    }
}

impl RecognizerConfig {
    /// Default config file path
    pub fn config_path() -> Option<PathBuf> {
        std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|_| std::env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
            .ok()
            .map(|dir| dir.join("kadi-gestures").join("gestures.toml"))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    /// Load and validate config from a file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        info!(path = %path.display(), "Loaded gesture config");
        Ok(config)
    }

    /// Load config from the default path, or return default if missing or invalid
    pub fn load_or_default() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring invalid gesture config");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        let thresholds = [
            ("swipe_distance_threshold_px", self.swipe_distance_threshold_px),
            ("swipe_velocity_threshold", self.swipe_velocity_threshold),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if self.double_tap_window_ms == 0 {
            return Err(Error::InvalidConfig("double_tap_window_ms must be positive".into()));
        }
        if self.long_press_delay_ms == 0 {
            return Err(Error::InvalidConfig("long_press_delay_ms must be positive".into()));
        }
        if !self.wheel_up_threshold.is_finite() || self.wheel_up_threshold > 0.0 {
            return Err(Error::InvalidConfig(format!(
                "wheel_up_threshold must be zero or negative, got {}",
                self.wheel_up_threshold
            )));
        }
        if !self.wheel_down_threshold.is_finite() || self.wheel_down_threshold < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "wheel_down_threshold must be zero or positive, got {}",
                self.wheel_down_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = RecognizerConfig::default();
        assert_eq!(config.swipe_distance_threshold_px, 50.0);
        assert_eq!(config.swipe_velocity_threshold, 0.3);
        assert_eq!(config.double_tap_window_ms, 300);
        assert_eq!(config.long_press_delay_ms, 500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config = RecognizerConfig::from_toml_str("long_press_delay_ms = 800\n").unwrap();
        assert_eq!(config.long_press_delay_ms, 800);
        assert_eq!(config.double_tap_window_ms, 300);
        assert_eq!(RecognizerConfig::from_toml_str("").unwrap(), RecognizerConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            RecognizerConfig::from_toml_str("double_tap_window_ms = 0"),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            RecognizerConfig::from_toml_str("swipe_velocity_threshold = -1.0"),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            RecognizerConfig::from_toml_str("wheel_up_threshold = 20.0"),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            RecognizerConfig::from_toml_str("long_press_delay_ms = \"soon\""),
            Err(Error::ConfigParse(_))
        ));
    }

    #[test]
    fn test_toml_roundtrip_through_file() {
        let mut config = RecognizerConfig::default();
        config.swipe_distance_threshold_px = 72.5;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(config.to_toml_string().unwrap().as_bytes()).unwrap();

        let loaded = RecognizerConfig::load(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = RecognizerConfig::load(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
