//! reset command - Delete all domains and documents

use anyhow::{Context as _, Result};

use super::{Context, Session};
use crate::ui::{output, prompts};

/// Clear saved data and return to an empty taxonomy.
pub fn reset(ctx: &Context) -> Result<()> {
    let mut session = Session::open(ctx)?;

    if !ctx.yes
        && !prompts::confirm(
            "Delete all domains and documents? This cannot be undone.",
            false,
            ctx.interactive,
        )?
    {
        output::print("Cancelled.", ctx.verbosity());
        return session.finish(ctx);
    }

    session
        .engine
        .reset()
        .context("Failed to clear saved data")?;
    session.forget_cursor()?;

    output::print(
        "All domains and documents deleted. Run 'dt setup' to start again.",
        ctx.verbosity(),
    );
    Ok(())
}
