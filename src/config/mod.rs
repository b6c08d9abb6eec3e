//! Configuration management for framer.
//!
//! Configuration is loaded from a platform config directory with sensible
//! defaults. All config structs implement `Default` with the canvas, limit,
//! and timeout constants the pipeline is specified against.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for framer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Composition canvas settings
    pub canvas: CanvasConfig,

    /// Resource limits
    pub limits: LimitsConfig,

    /// Frame asset settings
    pub frames: FramesConfig,

    /// Preview output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.framer.framer/config.toml
    /// - Linux: ~/.config/framer/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\framer\config\config.toml
    ///
    /// Falls back to ~/.framer/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "framer", "framer")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".framer").join("config.toml")
            })
    }

    /// Get the resolved frame asset directory (with ~ expansion).
    pub fn frames_dir(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.frames.dir);
        PathBuf::from(expanded.into_owned())
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.canvas.size, 2000);
        assert_eq!(config.limits.max_image_dimension, 2000);
        assert_eq!(config.limits.decode_timeout_ms, 20_000);
        assert_eq!(config.output.download_name, "hass_frame.png");
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[canvas]"));
        assert!(toml.contains("[limits]"));
        assert!(toml.contains("[frames]"));
    }

    #[test]
    fn test_load_from_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[frames]\ndir = \"/srv/frames\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.frames.dir, "/srv/frames");
        // Unspecified sections keep their defaults
        assert_eq!(config.canvas.size, 2000);
    }

    #[test]
    fn test_frames_dir_tilde_expansion() {
        let mut config = Config::default();
        config.frames.dir = "~/frames".to_string();
        let dir = config.frames_dir();
        assert!(!dir.to_string_lossy().contains('~'));
    }
}
