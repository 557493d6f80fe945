//! setup and add commands

use anyhow::{Context as _, Result};

use super::{parse_name, Context, Session};
use crate::ui::output;

/// Set the root domains.
pub fn setup(ctx: &Context, names: &[String]) -> Result<()> {
    let names = names
        .iter()
        .map(|n| parse_name(n))
        .collect::<Result<Vec<_>>>()?;

    let mut session = Session::open(ctx)?;
    session
        .engine
        .setup(names)
        .context("Setup needs at least three different domain names")?;

    let roots = &session.engine.state().tree.items;
    output::print(
        format!("Root domains:\n{}", output::format_list(roots, "  ")),
        ctx.verbosity(),
    );
    session.finish(ctx)
}

/// Add a domain at the current location, or a root domain with `--root`.
pub fn add(ctx: &Context, raw_name: &str, root: bool) -> Result<()> {
    let name = parse_name(raw_name)?;

    let mut session = Session::open(ctx)?;
    session.require_setup()?;

    let display = name.to_string();
    if root {
        session.engine.add_domain(name)?;
    } else {
        session.engine.add_here(name)?;
    }

    let parent = &session.engine.state().current_path;
    if root || parent.is_root() {
        output::print(format!("Added root domain '{}'", display), ctx.verbosity());
    } else {
        output::print(
            format!("Added '{}' under {}", display, parent),
            ctx.verbosity(),
        );
    }
    session.finish(ctx)
}
