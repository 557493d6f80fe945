//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$DOMAINTREE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/domaintree/config.toml`
//! 3. `~/.domaintree/config.toml` (canonical write location)
//!
//! # Tree Config
//!
//! [`TreeConfig`] is not read from the config file. It travels inside the
//! persisted snapshot and is changed through `SetConfig` actions. The file
//! only supplies the `max_depth` a fresh state starts with.
//!
//! # Validation
//!
//! Config values are validated after parsing to ensure they conform to
//! expected formats (e.g., `max_depth` must be positive).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Default depth bound for the taxonomy.
pub const DEFAULT_MAX_DEPTH: u32 = 10;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// data_dir = "/home/me/.local/share/domaintree"
/// max_depth = 12
///
/// [persistence]
/// provider = "file"
///
/// [log]
/// level = "info"
/// format = "compact"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Directory holding state, session, and lock files
    pub data_dir: Option<PathBuf>,

    /// Depth bound for a fresh state
    pub max_depth: Option<u32>,

    /// Persistence settings
    pub persistence: Option<PersistenceConfig>,

    /// Logging settings
    pub log: Option<LogSettings>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(depth) = self.max_depth {
            if depth == 0 {
                return Err(ConfigError::InvalidValue(
                    "max_depth must be a positive integer".to_string(),
                ));
            }
        }

        if let Some(dir) = &self.data_dir {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "data_dir cannot be empty".to_string(),
                ));
            }
        }

        if let Some(persistence) = &self.persistence {
            persistence.validate()?;
        }

        if let Some(log) = &self.log {
            log.validate()?;
        }

        Ok(())
    }
}

/// Persistence configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PersistenceConfig {
    /// Provider to use ("file" or "memory")
    pub provider: Option<String>,
}

impl PersistenceConfig {
    /// Valid persistence providers.
    pub const VALID_PROVIDERS: &'static [&'static str] = &["file", "memory"];

    /// Validate the persistence configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(provider) = &self.provider {
            if !Self::VALID_PROVIDERS.contains(&provider.as_str()) {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid persistence provider '{}', must be one of: {}",
                    provider,
                    Self::VALID_PROVIDERS.join(", ")
                )));
            }
        }
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LogSettings {
    /// Minimum level ("error", "warn", "info", "debug", "trace")
    pub level: Option<String>,

    /// Output format ("compact", "pretty", "json")
    pub format: Option<String>,
}

impl LogSettings {
    /// Valid level names.
    pub const VALID_LEVELS: &'static [&'static str] = &["error", "warn", "info", "debug", "trace"];

    /// Valid format names.
    pub const VALID_FORMATS: &'static [&'static str] = &["compact", "pretty", "json"];

    /// Validate the logging configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(level) = &self.level {
            if !Self::VALID_LEVELS.contains(&level.as_str()) {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid log level '{}', must be one of: {}",
                    level,
                    Self::VALID_LEVELS.join(", ")
                )));
            }
        }
        if let Some(format) = &self.format {
            if !Self::VALID_FORMATS.contains(&format.as_str()) {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid log format '{}', must be one of: {}",
                    format,
                    Self::VALID_FORMATS.join(", ")
                )));
            }
        }
        Ok(())
    }
}

/// Configuration carried in the application state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TreeConfig {
    /// How many path segments may exist below the root
    pub max_depth: u32,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl TreeConfig {
    /// Shallow-merge a patch: fields set in `patch` win.
    ///
    /// A zero `max_depth` in the patch is ignored so the bound stays
    /// positive.
    pub fn merge(self, patch: &ConfigPatch) -> Self {
        Self {
            max_depth: patch
                .max_depth
                .filter(|depth| *depth > 0)
                .unwrap_or(self.max_depth),
        }
    }
}

/// A partial [`TreeConfig`] for `SetConfig`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigPatch {
    pub max_depth: Option<u32>,
}

impl From<TreeConfig> for ConfigPatch {
    fn from(config: TreeConfig) -> Self {
        Self {
            max_depth: Some(config.max_depth),
        }
    }
}
