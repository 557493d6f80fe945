//! document commands - attach, docs, clear-docs

use std::fs;
use std::path::Path;

use anyhow::{bail, Context as _, Result};

use super::{Context, Session};
use crate::core::navigation::current_documents;
use crate::core::types::Document;
use crate::ui::{output, prompts};

/// Attach a file, or inline `--content`, to the current domain.
pub fn attach(
    ctx: &Context,
    file: Option<&Path>,
    name: Option<&str>,
    content: Option<&str>,
) -> Result<()> {
    let document = match (file, content) {
        (Some(file), None) => {
            let text = fs::read_to_string(file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let name = match name {
                Some(name) => name.to_string(),
                None => file
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .with_context(|| format!("{} has no file name; pass --name", file.display()))?,
            };
            Document::new(name, text)?
        }
        (None, Some(text)) => {
            let name = name.context("--content needs --name")?;
            Document::new(name, text)?
        }
        _ => bail!("Give a file or --content"),
    };

    let mut session = Session::open(ctx)?;
    session.require_setup()?;

    let doc_name = document.name.clone();
    session.engine.add_document(document)?;
    output::print(
        format!(
            "Attached '{}' to {}",
            doc_name,
            session.engine.state().current_path
        ),
        ctx.verbosity(),
    );
    session.finish(ctx)
}

/// List documents here, or print the content of one.
pub fn docs(ctx: &Context, name: Option<&str>) -> Result<()> {
    let session = Session::open(ctx)?;
    let documents = current_documents(session.engine.state());

    match name {
        Some(name) => {
            let document = documents
                .iter()
                .find(|d| d.name == name)
                .with_context(|| format!("No document named '{}' here", name))?;
            output::data(&document.content);
        }
        None if documents.is_empty() => {
            output::print("No documents here.", ctx.verbosity());
        }
        None => output::data(output::format_documents(documents)),
    }
    session.finish(ctx)
}

/// Drop every document everywhere.
pub fn clear_docs(ctx: &Context) -> Result<()> {
    let mut session = Session::open(ctx)?;
    let count = session.engine.state().documents.document_count();
    if count == 0 {
        output::print("No documents to clear.", ctx.verbosity());
        return session.finish(ctx);
    }

    if !ctx.yes
        && !prompts::confirm(
            &format!("Remove all {} document(s)?", count),
            false,
            ctx.interactive,
        )?
    {
        output::print("Cancelled.", ctx.verbosity());
        return session.finish(ctx);
    }

    session.engine.clear_documents()?;
    output::print(format!("Removed {} document(s).", count), ctx.verbosity());
    session.finish(ctx)
}
