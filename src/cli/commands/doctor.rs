//! doctor command - Report problems in saved data

use anyhow::Result;

use super::{Context, Session};
use crate::core::verify::verify;
use crate::ui::output;

/// Report orphans and over-deep paths. Never changes anything.
pub fn doctor(ctx: &Context) -> Result<()> {
    let session = Session::open(ctx)?;
    let state = session.engine.state();

    let issues = verify(state);
    output::print(
        format!(
            "{} root domain(s), {} reachable domain(s), {} document(s)",
            state.tree.items.len(),
            state.tree.reachable_count(),
            state.documents.document_count()
        ),
        ctx.verbosity(),
    );

    if issues.is_empty() {
        output::print("No issues found.", ctx.verbosity());
    } else {
        output::print(format!("{} issue(s):", issues.len()), ctx.verbosity());
        output::data(output::format_list(&issues, "  "));
    }
    session.finish(ctx)
}
