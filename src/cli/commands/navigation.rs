//! navigation commands - cd, up, jump, home, pwd

use anyhow::{bail, Context as _, Result};

use super::{parse_name, Context, Session};
use crate::core::codec::{encode, parse_user_path};
use crate::core::navigation::{breadcrumbs, render_breadcrumbs};
use crate::ui::output;

/// Enter a child domain, go to the parent with `..`, or jump to `--path`.
pub fn cd(ctx: &Context, name: Option<&str>, path: Option<&str>) -> Result<()> {
    let mut session = Session::open(ctx)?;
    session.require_setup()?;

    match (name, path) {
        (_, Some(text)) => {
            let target = parse_user_path(text).context("Invalid path")?;
            if !session.engine.restore_path(target.clone())? {
                bail!("No such domain: {}", target);
            }
        }
        (Some(".."), None) => {
            session.engine.go_up(1)?;
        }
        (Some(raw), None) => {
            let name = parse_name(raw)?;
            session.engine.select_domain(name)?;
        }
        (None, None) => bail!("Give a domain name or --path"),
    }

    print_location(ctx, &session);
    session.finish(ctx)
}

/// Go up `steps` levels.
pub fn up(ctx: &Context, steps: usize) -> Result<()> {
    let mut session = Session::open(ctx)?;
    session.engine.go_up(steps)?;
    print_location(ctx, &session);
    session.finish(ctx)
}

/// Jump to a breadcrumb level.
pub fn jump(ctx: &Context, level: usize) -> Result<()> {
    let mut session = Session::open(ctx)?;
    session.engine.navigate_to(level)?;
    print_location(ctx, &session);
    session.finish(ctx)
}

/// Return to Home.
pub fn home(ctx: &Context) -> Result<()> {
    jump(ctx, 0)
}

/// Show the current location.
pub fn pwd(ctx: &Context, levels: bool, key: bool) -> Result<()> {
    let session = Session::open(ctx)?;
    let path = &session.engine.state().current_path;

    if key {
        output::data(encode(path));
    } else if levels {
        for crumb in breadcrumbs(path) {
            output::data(format!("{}  {}", crumb.level, crumb.label));
        }
    } else {
        output::data(render_breadcrumbs(&breadcrumbs(path)));
    }
    session.finish(ctx)
}

fn print_location(ctx: &Context, session: &Session) {
    let trail = breadcrumbs(&session.engine.state().current_path);
    output::print(render_breadcrumbs(&trail), ctx.verbosity());
}
