//! core::verify
//!
//! Read-only checks over a state.
//!
//! Nothing here repairs anything. Orphaned child lists and document lists
//! are reported so the user can see them; they are kept in the snapshot as
//! they are.

use std::fmt;

use crate::core::codec::PathKey;
use crate::core::state::AppState;

/// A problem found by [`verify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    /// A child list whose parent path cannot be reached from the root.
    OrphanedSubtree { key: PathKey, children: usize },
    /// A document list whose path cannot be reached from the root.
    OrphanedDocuments { key: PathKey, documents: usize },
    /// A reachable path deeper than the configured bound.
    ExceedsMaxDepth { key: PathKey, depth: usize },
}

impl Issue {
    /// Stable identifier of the issue kind.
    pub fn id(&self) -> &'static str {
        match self {
            Issue::OrphanedSubtree { .. } => "orphaned-subtree",
            Issue::OrphanedDocuments { .. } => "orphaned-documents",
            Issue::ExceedsMaxDepth { .. } => "exceeds-max-depth",
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::OrphanedSubtree { key, children } => write!(
                f,
                "{}: '{}' has {} child domain(s) but is not reachable from the root",
                self.id(),
                key,
                children
            ),
            Issue::OrphanedDocuments { key, documents } => write!(
                f,
                "{}: '{}' has {} document(s) but is not reachable from the root",
                self.id(),
                key,
                documents
            ),
            Issue::ExceedsMaxDepth { key, depth } => write!(
                f,
                "{}: '{}' is {} levels deep",
                self.id(),
                key,
                depth
            ),
        }
    }
}

/// Check `state` for orphans and over-deep paths.
///
/// Issues are returned in key order, subtrees first.
pub fn verify(state: &AppState) -> Vec<Issue> {
    let mut issues = Vec::new();

    for key in state.tree.orphan_keys() {
        issues.push(Issue::OrphanedSubtree {
            key: key.clone(),
            children: state.tree.children.get(key).map_or(0, Vec::len),
        });
    }

    for key in state.documents.keys() {
        let reachable = key
            .to_path()
            .map(|p| state.tree.contains_path(&p))
            .unwrap_or(false);
        if !reachable {
            let documents = key
                .to_path()
                .map(|p| state.documents.list_at(&p).len())
                .unwrap_or(0);
            if documents > 0 {
                issues.push(Issue::OrphanedDocuments {
                    key: key.clone(),
                    documents,
                });
            }
        }
    }

    let max_depth = state.config.max_depth as usize;
    for key in state.tree.children.keys() {
        if let Ok(parent) = key.to_path() {
            // Children of `parent` sit one level below it.
            let depth = parent.depth() + 1;
            if depth > max_depth && state.tree.contains_path(&parent) {
                issues.push(Issue::ExceedsMaxDepth {
                    key: key.clone(),
                    depth,
                });
            }
        }
    }

    issues
}
