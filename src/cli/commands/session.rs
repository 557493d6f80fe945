//! Per-command session: lock, engine, and cursor.

use anyhow::{bail, Context as _, Result};
use tracing::warn;

use super::Context;
use crate::core::lock::DataLock;
use crate::engine::{BootOutcome, Engine};
use crate::persistence::create_gateway;
use crate::persistence::session::SessionCursor;
use crate::ui::output;

/// Everything a command needs to read or change the taxonomy.
///
/// Holds the data lock until dropped.
pub struct Session {
    pub engine: Engine,
    cursor: SessionCursor,
    _lock: DataLock,
}

impl Session {
    /// Lock the data directory, bootstrap the engine, and restore the
    /// current path.
    pub fn open(ctx: &Context) -> Result<Self> {
        let paths = ctx.data_paths()?;
        let lock = DataLock::acquire(&paths).with_context(|| {
            format!(
                "Cannot lock data directory {}. Is another dt command running?",
                paths.root().display()
            )
        })?;

        let gateway = create_gateway(ctx.config.persistence_provider(), &paths)
            .context("Failed to open storage")?;
        let mut engine = Engine::new(gateway, ctx.config.initial_tree_config());

        if let BootOutcome::Recovered { .. } = engine.bootstrap() {
            if let Some(message) = &engine.state().error {
                output::warn(message, ctx.verbosity());
            }
            engine.dismiss_error();
        }

        let cursor = SessionCursor::with_path(paths.session_path());
        match cursor.load() {
            Ok(Some(path)) if !path.is_root() => {
                if !engine.restore_path(path.clone())? {
                    output::warn(
                        format!("'{}' no longer exists; back at Home", path),
                        ctx.verbosity(),
                    );
                }
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "ignoring unreadable session cursor"),
        }

        Ok(Self {
            engine,
            cursor,
            _lock: lock,
        })
    }

    /// Fail unless the root domains have been set up.
    pub fn require_setup(&self) -> Result<()> {
        if self.engine.needs_setup() {
            bail!("No domains yet. Run 'dt setup <A> <B> <C>' first.");
        }
        Ok(())
    }

    /// Save the current path and report a failed snapshot save.
    pub fn finish(self, ctx: &Context) -> Result<()> {
        if let Some(e) = self.engine.last_save_error() {
            output::warn(
                format!("changes could not be saved: {}", e),
                ctx.verbosity(),
            );
        }
        self.cursor
            .save(&self.engine.state().current_path)
            .context("Failed to save current location")
    }

    /// Forget the saved current path.
    pub fn forget_cursor(&self) -> Result<()> {
        self.cursor
            .clear()
            .context("Failed to clear current location")
    }
}
