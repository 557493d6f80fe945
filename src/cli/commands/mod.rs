//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Opens a [`Session`] (config, lock, engine, cursor)
//! 3. Calls engine operations
//! 4. Formats and displays output
//!
//! Handlers do NOT touch persisted data directly.

mod completion;
mod config_cmd;
mod documents;
mod doctor;
mod domains;
mod listing;
mod navigation;
mod reset;
mod session;

pub use completion::completion;
pub use config_cmd::{
    get as config_get, init as config_init, list as config_list, set as config_set,
};
pub use documents::{attach, clear_docs, docs};
pub use doctor::doctor;
pub use domains::{add, setup};
pub use listing::{ls, tree};
pub use navigation::{cd, home, jump, pwd, up};
pub use reset::reset;
pub use session::Session;

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::cli::args::{Command, ConfigAction};
use crate::core::config::Config;
use crate::core::paths::DataPaths;
use crate::core::types::DomainName;
use crate::ui::output::Verbosity;

/// Settings shared by every command.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// The loaded config file (defaults if none was found).
    pub config: Config,
    /// `--data-dir`, overriding the configured directory.
    pub data_dir: Option<PathBuf>,
    pub debug: bool,
    pub quiet: bool,
    /// `--yes`: skip confirmations.
    pub yes: bool,
    pub interactive: bool,
}

impl Context {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }

    /// Resolve the data directory: `--data-dir`, then the config file.
    pub fn data_paths(&self) -> Result<DataPaths> {
        let root = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => self
                .config
                .data_dir()
                .context("Cannot determine data directory")?,
        };
        Ok(DataPaths::new(root))
    }
}

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Setup { names } => domains::setup(ctx, &names),
        Command::Add { name, root } => domains::add(ctx, &name, root),

        Command::Cd { name, path } => navigation::cd(ctx, name.as_deref(), path.as_deref()),
        Command::Up { steps } => navigation::up(ctx, steps),
        Command::Jump { level } => navigation::jump(ctx, level),
        Command::Home => navigation::home(ctx),
        Command::Pwd { levels, key } => navigation::pwd(ctx, levels, key),

        Command::Ls => listing::ls(ctx),
        Command::Tree => listing::tree(ctx),

        Command::Attach {
            file,
            name,
            content,
        } => documents::attach(ctx, file.as_deref(), name.as_deref(), content.as_deref()),
        Command::Docs { name } => documents::docs(ctx, name.as_deref()),
        Command::ClearDocs => documents::clear_docs(ctx),

        Command::Config { action } => match action {
            ConfigAction::Get { key } => config_cmd::get(ctx, &key),
            ConfigAction::Set { key, value } => config_cmd::set(ctx, &key, &value),
            ConfigAction::List => config_cmd::list(ctx),
            ConfigAction::Init { force } => config_cmd::init(ctx, force),
        },
        Command::Reset => reset::reset(ctx),
        Command::Doctor => doctor::doctor(ctx),
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Parse a domain name typed by the user, trimming surrounding whitespace.
pub(crate) fn parse_name(raw: &str) -> Result<DomainName> {
    DomainName::new(raw.trim()).with_context(|| format!("Invalid domain name '{}'", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_flag_wins() {
        let ctx = Context {
            data_dir: Some(PathBuf::from("/tmp/dt-data")),
            ..Context::default()
        };
        assert_eq!(
            ctx.data_paths().unwrap().root(),
            std::path::Path::new("/tmp/dt-data")
        );
    }

    #[test]
    fn names_are_trimmed() {
        assert_eq!(parse_name("  Physics ").unwrap().as_str(), "Physics");
        assert!(parse_name("   ").is_err());
    }
}
