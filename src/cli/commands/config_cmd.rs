//! config command - Get, set, list, or write configuration values

use anyhow::{bail, Context as _, Result};

use super::{Context, Session};
use crate::core::config::{Config, ConfigPatch, GlobalConfig, LogSettings, PersistenceConfig};
use crate::ui::output;

const MAX_DEPTH_KEYS: &[&str] = &["max-depth", "max_depth", "maxDepth"];

fn is_max_depth(key: &str) -> bool {
    MAX_DEPTH_KEYS.contains(&key)
}

/// Get a configuration value.
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    if !is_max_depth(key) {
        bail!("Unknown configuration key: {} (valid: max-depth)", key);
    }
    let session = Session::open(ctx)?;
    output::data(session.engine.state().config.max_depth);
    session.finish(ctx)
}

/// Set a configuration value.
pub fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    if !is_max_depth(key) {
        bail!("Unknown configuration key: {} (valid: max-depth)", key);
    }
    let max_depth: u32 = value
        .trim()
        .parse()
        .with_context(|| format!("max-depth must be a positive integer, got '{}'", value))?;

    let mut session = Session::open(ctx)?;
    session.engine.set_config(ConfigPatch {
        max_depth: Some(max_depth),
    })?;

    output::print(format!("Set max-depth = {}", max_depth), ctx.verbosity());
    session.finish(ctx)
}

/// List all configuration values.
pub fn list(ctx: &Context) -> Result<()> {
    let session = Session::open(ctx)?;
    let paths = ctx.data_paths()?;

    output::data("# Tree");
    output::data(format!(
        "max-depth = {}",
        session.engine.state().config.max_depth
    ));
    output::data("");
    output::data("# Settings");
    output::data(format!(
        "config-file = {}",
        ctx.config
            .loaded_from()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string())
    ));
    output::data(format!("data-dir = {}", paths.root().display()));
    output::data(format!(
        "persistence.provider = {}",
        ctx.config.persistence_provider()
    ));
    output::data(format!("log.level = {}", ctx.config.log_level()));
    output::data(format!("log.format = {}", ctx.config.log_format()));

    session.finish(ctx)
}

/// Write the effective file settings out as a config file.
///
/// Targets the file that was loaded, or the canonical location when none
/// was. An existing file is only replaced with `--force`.
pub fn init(ctx: &Context, force: bool) -> Result<()> {
    let path = match ctx.config.loaded_from() {
        Some(path) => path.to_path_buf(),
        None => Config::global_config_path().context("Cannot locate config directory")?,
    };
    if path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    Config::write_to(&path, &effective(&ctx.config)).context("Failed to write config")?;
    output::print(format!("Wrote {}", path.display()), ctx.verbosity());
    Ok(())
}

/// The loaded settings with every default spelled out.
fn effective(config: &Config) -> GlobalConfig {
    GlobalConfig {
        data_dir: config.global.data_dir.clone(),
        max_depth: Some(config.max_depth()),
        persistence: Some(PersistenceConfig {
            provider: Some(config.persistence_provider().to_string()),
        }),
        log: Some(LogSettings {
            level: Some(config.log_level().to_string()),
            format: Some(config.log_format().to_string()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_depth_spellings() {
        assert!(is_max_depth("max-depth"));
        assert!(is_max_depth("max_depth"));
        assert!(is_max_depth("maxDepth"));
        assert!(!is_max_depth("depth"));
    }

    #[test]
    fn effective_fills_defaults() {
        let global = effective(&Config::default());
        assert_eq!(global.max_depth, Some(10));
        assert_eq!(
            global.persistence.and_then(|p| p.provider).as_deref(),
            Some("file")
        );
        assert_eq!(global.log.and_then(|l| l.level).as_deref(), Some("warn"));
        assert!(global.data_dir.is_none());
    }
}
