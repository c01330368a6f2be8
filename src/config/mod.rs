//! Configuration module for allview
//!
//! Manages user settings for previews and favicon exports.
//! Configuration is stored in the user's config directory.

use crate::preview::{DEFAULT_MAX_TEXT_BYTES, PreviewConfig};
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Keys accepted by [`AllviewConfig::get`] and [`AllviewConfig::set`]
pub const KEYS: [&str; 4] = ["quiet", "output_dir", "open_after_export", "max_text_bytes"];

const fn default_max_text_bytes() -> u64 {
    DEFAULT_MAX_TEXT_BYTES
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AllviewConfig {
    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// Directory that receives `favicons.zip` (current directory if unset)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Open the archive with the system handler once it is saved
    #[serde(default)]
    pub open_after_export: bool,

    /// Text previews are cut off after this many bytes
    #[serde(default = "default_max_text_bytes")]
    pub max_text_bytes: u64,
}

impl Default for AllviewConfig {
    fn default() -> Self {
        Self {
            quiet: false,
            output_dir: None,
            open_after_export: false,
            max_text_bytes: DEFAULT_MAX_TEXT_BYTES,
        }
    }
}

impl AllviewConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("allview").join("config.toml"))
    }

    /// Load configuration from the user config file
    ///
    /// A missing file yields the defaults; nothing is written.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    ///
    /// # Errors
    ///
    /// See [`AllviewConfig::save`].
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Read a setting as text
    ///
    /// Returns `None` for unknown keys; an unset `output_dir` reads as an
    /// empty string.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "quiet" => Some(self.quiet.to_string()),
            "output_dir" => Some(
                self.output_dir
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            "open_after_export" => Some(self.open_after_export.to_string()),
            "max_text_bytes" => Some(self.max_text_bytes.to_string()),
            _ => None,
        }
    }

    /// Change a setting from text
    ///
    /// An empty value for `output_dir` unsets it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for unknown keys or values of the wrong type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |expected: &str| {
            ConfigError::Message(format!("Invalid value for {key}: '{value}'. Expected {expected}"))
        };

        match key {
            "quiet" => self.quiet = value.parse().map_err(|_| invalid("'true' or 'false'"))?,
            "open_after_export" => {
                self.open_after_export = value.parse().map_err(|_| invalid("'true' or 'false'"))?;
            }
            "max_text_bytes" => {
                self.max_text_bytes = value.parse().map_err(|_| invalid("a number of bytes"))?;
            }
            "output_dir" => {
                self.output_dir = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            _ => {
                return Err(ConfigError::Message(format!(
                    "Unknown configuration key: '{key}'. Available keys: {}",
                    KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }

    /// Preview settings derived from this configuration
    #[must_use]
    pub const fn preview_config(&self) -> PreviewConfig {
        PreviewConfig {
            max_text_bytes: self.max_text_bytes,
        }
    }

    /// Directory for favicon archives
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AllviewConfig::default();
        assert!(!config.quiet);
        assert!(config.output_dir.is_none());
        assert_eq!(config.max_text_bytes, DEFAULT_MAX_TEXT_BYTES);
        assert_eq!(config.output_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AllviewConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AllviewConfig::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AllviewConfig::default();
        config.quiet = true;
        config.output_dir = Some(PathBuf::from("/tmp/icons"));
        config.save_to(&path).unwrap();

        let loaded = AllviewConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "open_after_export = true\n").unwrap();

        let loaded = AllviewConfig::load_from(&path).unwrap();
        assert!(loaded.open_after_export);
        assert_eq!(loaded.max_text_bytes, DEFAULT_MAX_TEXT_BYTES);
    }

    #[test]
    fn test_set_and_get() {
        let mut config = AllviewConfig::default();

        config.set("quiet", "true").unwrap();
        config.set("max_text_bytes", "1024").unwrap();
        config.set("output_dir", "out").unwrap();

        assert_eq!(config.get("quiet").as_deref(), Some("true"));
        assert_eq!(config.get("max_text_bytes").as_deref(), Some("1024"));
        assert_eq!(config.get("output_dir").as_deref(), Some("out"));
        assert_eq!(config.preview_config().max_text_bytes, 1024);

        config.set("output_dir", "").unwrap();
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = AllviewConfig::default();
        assert!(config.set("quiet", "maybe").is_err());
        assert!(config.set("max_text_bytes", "-1").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert!(config.get("colour").is_none());
    }
}
