//! cli
//!
//! Command-line interface layer for domaintree.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load the config file and install logging
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. Handlers open a [`commands::Session`], call
//! [`crate::engine::Engine`] operations, and format the result. All state
//! changes flow through the engine.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};
pub use commands::Context;

use std::io::IsTerminal;

use anyhow::{Context as _, Result};

use crate::core::config::Config;
use crate::logging::{init_logging, LogConfig};
use crate::ui::prompts;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let config = Config::load().context("Failed to load config")?;

    let log_config = LogConfig::from_config(&config)
        .context("Invalid [log] settings")?
        .with_flags(cli.debug, cli.quiet)
        .with_ansi(std::io::stderr().is_terminal());
    init_logging(&log_config).context("Failed to initialize logging")?;

    let ctx = Context {
        config,
        data_dir: cli.data_dir,
        debug: cli.debug,
        quiet: cli.quiet,
        yes: cli.yes,
        interactive: !cli.quiet && prompts::is_interactive(),
    };

    commands::dispatch(cli.command, &ctx)
}
