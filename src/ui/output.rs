//! ui::output
//!
//! Output formatting and display.
//!
//! Output respects the quiet flag. Errors are always shown.

use std::fmt::Display;

use crate::core::state::AppState;
use crate::core::types::{Document, DomainName, DomainPath};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print data the user asked for. Shown even in quiet mode.
pub fn data(message: impl Display) {
    println!("{}", message);
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Format a list of items.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per document: name and content size.
pub fn format_documents(documents: &[Document]) -> String {
    documents
        .iter()
        .map(|d| format!("  {} ({} bytes)", d.name, d.content.len()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the reachable tree as an indented outline.
///
/// The current path is marked with `*`. Document counts are shown in
/// brackets next to domains that have any.
pub fn format_tree(state: &AppState) -> String {
    let mut lines = Vec::new();
    walk(state, &DomainPath::root(), 0, &mut lines);
    lines.join("\n")
}

fn walk(state: &AppState, path: &DomainPath, indent: usize, lines: &mut Vec<String>) {
    for name in state.tree.children_of(path) {
        let child = path.child(name.clone());
        lines.push(tree_line(state, &child, name, indent));
        walk(state, &child, indent + 1, lines);
    }
}

fn tree_line(state: &AppState, path: &DomainPath, name: &DomainName, indent: usize) -> String {
    let marker = if *path == state.current_path { "*" } else { " " };
    let docs = state.documents.list_at(path).len();
    let suffix = if docs > 0 {
        format!(" [{}]", docs)
    } else {
        String::new()
    };
    format!("{}{}{}{}", marker, "  ".repeat(indent), name, suffix)
}
