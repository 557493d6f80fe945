//! ls and tree commands

use anyhow::Result;

use super::{Context, Session};
use crate::core::navigation::{
    breadcrumbs, can_descend, current_documents, current_domains, render_breadcrumbs,
};
use crate::ui::output;

/// List domains and documents at the current location.
pub fn ls(ctx: &Context) -> Result<()> {
    let session = Session::open(ctx)?;
    let state = session.engine.state();

    if session.engine.needs_setup() {
        output::print(
            "No domains yet. Run 'dt setup <A> <B> <C>' to start.",
            ctx.verbosity(),
        );
        return session.finish(ctx);
    }

    output::print(
        render_breadcrumbs(&breadcrumbs(&state.current_path)),
        ctx.verbosity(),
    );

    let domains = current_domains(state);
    if domains.is_empty() {
        output::print("  (no subdomains)", ctx.verbosity());
    } else {
        output::data(output::format_list(domains, "  "));
    }

    let documents = current_documents(state);
    if !documents.is_empty() {
        output::print("Documents:", ctx.verbosity());
        output::data(output::format_documents(documents));
    }

    if !state.current_path.is_root() && !can_descend(&state.current_path, &state.config) {
        output::print(
            format!("(max depth {} reached)", state.config.max_depth),
            ctx.verbosity(),
        );
    }

    session.finish(ctx)
}

/// Show every reachable domain.
pub fn tree(ctx: &Context) -> Result<()> {
    let session = Session::open(ctx)?;
    session.require_setup()?;
    output::data(output::format_tree(session.engine.state()));
    session.finish(ctx)
}
