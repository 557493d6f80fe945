//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! domaintree has one configuration file at user scope. It controls where
//! data lives, the depth bound of a fresh taxonomy, which persistence
//! provider is used, and logging. The taxonomy's own depth bound, once
//! set, lives in the persisted snapshot (see [`TreeConfig`]).
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. CLI flags (not handled here)
//!
//! # Locations
//!
//! Searched in order:
//! 1. `$DOMAINTREE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/domaintree/config.toml`
//! 3. `~/.domaintree/config.toml` (canonical write location)
//!
//! # Example
//!
//! ```no_run
//! use domaintree::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("max depth: {}", config.max_depth());
//! println!("provider: {}", config.persistence_provider());
//! ```

pub mod schema;

pub use schema::{
    ConfigPatch, GlobalConfig, LogSettings, PersistenceConfig, TreeConfig, DEFAULT_MAX_DEPTH,
};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "DOMAINTREE_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Loaded configuration with defaults applied by the accessors.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Path to the config file (if one was loaded)
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed or
    /// fails validation. A missing file is not an error (defaults are used).
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_global()? {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit file.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let global = Self::read_global_config(path)?;
        global.validate()?;
        Ok(Self {
            global,
            path: Some(path.to_path_buf()),
        })
    }

    /// Find the first existing global config file.
    fn find_global() -> Result<Option<PathBuf>, ConfigError> {
        // 1. Check $DOMAINTREE_CONFIG
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        // 2. Check $XDG_CONFIG_HOME/domaintree/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("domaintree/config.toml");
            if path.exists() {
                return Ok(Some(path));
            }
        }

        // 3. Check ~/.domaintree/config.toml
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".domaintree/config.toml");
            if path.exists() {
                return Ok(Some(path));
            }
        }

        Ok(None)
    }

    fn read_global_config(path: &Path) -> Result<GlobalConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the canonical path for the global config.
    ///
    /// Returns `~/.domaintree/config.toml`.
    pub fn global_config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".domaintree/config.toml"))
    }

    /// Write a config file atomically.
    ///
    /// Creates parent directories if needed. Uses atomic write
    /// (write to temp file, then rename) to prevent corruption.
    pub fn write_to(path: &Path, config: &GlobalConfig) -> Result<(), ConfigError> {
        config.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        let temp_path = path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Get the data directory.
    ///
    /// Defaults to `~/.domaintree`.
    pub fn data_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.global.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => {
                let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
                Ok(home.join(".domaintree"))
            }
        }
    }

    /// Get the depth bound for a fresh state.
    ///
    /// Defaults to [`DEFAULT_MAX_DEPTH`].
    pub fn max_depth(&self) -> u32 {
        self.global.max_depth.unwrap_or(DEFAULT_MAX_DEPTH)
    }

    /// The tree config a fresh state starts with.
    pub fn initial_tree_config(&self) -> TreeConfig {
        TreeConfig {
            max_depth: self.max_depth(),
        }
    }

    /// Get the persistence provider.
    ///
    /// Defaults to "file".
    pub fn persistence_provider(&self) -> &str {
        self.global
            .persistence
            .as_ref()
            .and_then(|p| p.provider.as_deref())
            .unwrap_or("file")
    }

    /// Get the log level.
    ///
    /// Defaults to "warn".
    pub fn log_level(&self) -> &str {
        self.global
            .log
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or("warn")
    }

    /// Get the log format.
    ///
    /// Defaults to "compact".
    pub fn log_format(&self) -> &str {
        self.global
            .log
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .unwrap_or("compact")
    }

    /// Get the path the config was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_without_file() {
        let config = Config::default();
        assert_eq!(config.max_depth(), 10);
        assert_eq!(config.persistence_provider(), "file");
        assert_eq!(config.log_level(), "warn");
        assert_eq!(config.log_format(), "compact");
        assert!(config.loaded_from().is_none());
    }

    #[test]
    fn load_from_path_applies_values() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
            data_dir = "/srv/dt"
            max_depth = 3

            [log]
            level = "debug"
            "#,
        )
        .unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.max_depth(), 3);
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/srv/dt"));
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.log_format(), "compact");
        assert_eq!(config.loaded_from(), Some(path.as_path()));
        assert_eq!(config.initial_tree_config().max_depth, 3);
    }

    #[test]
    fn invalid_value_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "max_depth = 0").unwrap();

        assert!(matches!(
            Config::load_from_path(&path),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn parse_error_names_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "max_depth = [").unwrap();

        let err = Config::load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn write_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/config.toml");
        let global = GlobalConfig {
            max_depth: Some(7),
            persistence: Some(PersistenceConfig {
                provider: Some("memory".into()),
            }),
            ..Default::default()
        };

        Config::write_to(&path, &global).unwrap();
        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.global, global);
        assert_eq!(loaded.persistence_provider(), "memory");
    }

    #[test]
    fn write_rejects_invalid() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        let global = GlobalConfig {
            max_depth: Some(0),
            ..Default::default()
        };
        assert!(Config::write_to(&path, &global).is_err());
        assert!(!path.exists());
    }
}
