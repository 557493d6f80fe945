//! logging
//!
//! Structured diagnostics through `tracing` and `tracing-subscriber`.
//!
//! User-facing output goes through [`crate::ui::output`]; this module only
//! covers diagnostics, which are written to stderr.
//!
//! # Levels
//!
//! - `warn` (default): failed saves, discarded snapshots
//! - `info`: bootstrap outcome, resets
//! - `debug`: every dispatched action
//!
//! The level comes from the `[log]` config section and the `--debug` /
//! `--quiet` flags. `RUST_LOG`, when set, overrides both.

use std::io;

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::core::config::Config;

/// Errors from logging setup.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log level: '{0}'")]
    InvalidLevel(String),

    #[error("invalid log format: '{0}'")]
    InvalidFormat(String),

    #[error("failed to install subscriber: {0}")]
    Init(String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Single-line format.
    #[default]
    Compact,
    /// Multi-line human-readable format.
    Pretty,
    /// One JSON object per event.
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(LoggingError::InvalidFormat(other.to_string())),
        }
    }
}

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub format: LogFormat,
    /// Include the module path in each event.
    pub with_target: bool,
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            format: LogFormat::default(),
            with_target: false,
            with_ansi: true,
        }
    }
}

impl LogConfig {
    /// Build from the `[log]` section of the global config.
    pub fn from_config(config: &Config) -> Result<Self, LoggingError> {
        Ok(Self {
            level: parse_level(config.log_level())?,
            format: config.log_format().parse()?,
            ..Self::default()
        })
    }

    /// Apply the command-line verbosity flags.
    ///
    /// `--debug` raises the level to debug and shows targets; `--quiet`
    /// lowers it to error. `--debug` wins if both are given.
    #[must_use]
    pub fn with_flags(mut self, debug: bool, quiet: bool) -> Self {
        if debug {
            self.level = Level::DEBUG;
            self.with_target = true;
        } else if quiet {
            self.level = Level::ERROR;
        }
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }
}

fn parse_level(s: &str) -> Result<Level, LoggingError> {
    match s {
        "error" => Ok(Level::ERROR),
        "warn" => Ok(Level::WARN),
        "info" => Ok(Level::INFO),
        "debug" => Ok(Level::DEBUG),
        "trace" => Ok(Level::TRACE),
        other => Err(LoggingError::InvalidLevel(other.to_string())),
    }
}

/// Install the global subscriber, writing to stderr.
///
/// # Errors
///
/// Returns `LoggingError::Init` if a global subscriber is already set.
pub fn init_logging(config: &LogConfig) -> Result<(), LoggingError> {
    init_logging_with_writer(config, io::stderr)
}

/// Install the global subscriber with a custom writer.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W) -> Result<(), LoggingError>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = build_env_filter(config.level);
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_target(config.with_target),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .without_time()
                    .with_writer(writer)
                    .with_ansi(config.with_ansi)
                    .with_target(config.with_target),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_writer(writer)
                    .with_ansi(config.with_ansi)
                    .with_target(config.with_target),
            )
            .try_init(),
    };

    result.map_err(|e| LoggingError::Init(e.to_string()))
}

/// `RUST_LOG` if set, otherwise this crate at `level` and everything else at warn.
fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,domaintree={}",
            level.as_str().to_lowercase()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn defaults_from_empty_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "").unwrap();
        let config = Config::load_from_path(&path).unwrap();

        let log = LogConfig::from_config(&config).unwrap();
        assert_eq!(log.level, Level::WARN);
        assert_eq!(log.format, LogFormat::Compact);
    }

    #[test]
    fn reads_log_section() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[log]\nlevel = \"info\"\nformat = \"json\"").unwrap();
        let config = Config::load_from_path(&path).unwrap();

        let log = LogConfig::from_config(&config).unwrap();
        assert_eq!(log.level, Level::INFO);
        assert_eq!(log.format, LogFormat::Json);
    }

    #[test]
    fn flags_override_level() {
        let base = LogConfig::default();
        assert_eq!(base.clone().with_flags(true, false).level, Level::DEBUG);
        assert!(base.clone().with_flags(true, false).with_target);
        assert_eq!(base.clone().with_flags(false, true).level, Level::ERROR);
        assert_eq!(base.clone().with_flags(true, true).level, Level::DEBUG);
        assert_eq!(base.with_flags(false, false).level, Level::WARN);
    }

    #[test]
    fn parse_format() {
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!(matches!(
            "xml".parse::<LogFormat>(),
            Err(LoggingError::InvalidFormat(_))
        ));
        assert!(matches!(parse_level("loud"), Err(LoggingError::InvalidLevel(_))));
    }
}
