//! core::state
//!
//! Application state and the transition function over it.
//!
//! # Model
//!
//! [`AppState`] is an immutable snapshot. [`apply`] takes a snapshot and an
//! [`Action`] and returns the next snapshot; it never fails and never
//! mutates its input. An action whose precondition does not hold yields the
//! input state unchanged. The only exception is `SetInitialDomains`, which
//! records the setup error in [`AppState::error`].
//!
//! Callers that need to tell the user *why* an action had no effect
//! validate before dispatching (see [`crate::engine`]).
//!
//! # Example
//!
//! ```
//! use domaintree::core::state::{apply, Action, AppState};
//! use domaintree::core::types::DomainName;
//!
//! let names = ["Physics", "Biology", "History"]
//!     .iter()
//!     .map(|n| DomainName::new(*n).unwrap())
//!     .collect();
//!
//! let state = apply(AppState::default(), Action::SetInitialDomains(names));
//! assert_eq!(state.tree.items.len(), 3);
//! assert!(state.error.is_none());
//! ```

use crate::core::config::{ConfigPatch, TreeConfig};
use crate::core::documents::DocumentStore;
use crate::core::tree::DomainTree;
use crate::core::types::{Document, DomainName, DomainPath};

/// The complete application state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub tree: DomainTree,
    pub documents: DocumentStore,
    pub current_path: DomainPath,
    pub config: TreeConfig,
    pub loading: bool,
    pub error: Option<String>,
}

impl AppState {
    /// A fresh state with the given tree config.
    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }
}

/// A state transition request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Replace the root domains. Requires at least three distinct names.
    SetInitialDomains(Vec<DomainName>),
    /// Append a root domain.
    AddDomain(DomainName),
    /// Append a child under a non-empty, reachable parent within the depth bound.
    AddSubdomain {
        parent: DomainPath,
        name: DomainName,
    },
    /// Attach a document at a path.
    AddDocument { path: DomainPath, document: Document },
    /// Move the current path.
    SetPath(DomainPath),
    /// Shallow-merge into the tree config.
    SetConfig(ConfigPatch),
    /// Drop every attached document.
    ClearDocuments,
    /// Back to defaults, keeping the tree config.
    Reset,
    /// Mark a load in progress.
    SetLoading(bool),
    /// Set or clear the user-facing error message.
    SetError(Option<String>),
}

impl Action {
    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::SetInitialDomains(_) => "set-initial-domains",
            Action::AddDomain(_) => "add-domain",
            Action::AddSubdomain { .. } => "add-subdomain",
            Action::AddDocument { .. } => "add-document",
            Action::SetPath(_) => "set-path",
            Action::SetConfig(_) => "set-config",
            Action::ClearDocuments => "clear-documents",
            Action::Reset => "reset",
            Action::SetLoading(_) => "set-loading",
            Action::SetError(_) => "set-error",
        }
    }

    /// Whether applying this action can change the persisted part of the state.
    pub fn touches_snapshot(&self) -> bool {
        !matches!(
            self,
            Action::SetPath(_) | Action::SetLoading(_) | Action::SetError(_)
        )
    }
}

/// Apply `action` to `state`, returning the next state.
pub fn apply(state: AppState, action: Action) -> AppState {
    match action {
        Action::SetInitialDomains(names) => match state.tree.clone().replace_roots(names) {
            Ok(tree) => AppState {
                tree,
                error: None,
                ..state
            },
            Err(e) => AppState {
                error: Some(e.to_string()),
                ..state
            },
        },

        Action::AddDomain(name) => {
            if state.tree.items.contains(&name) {
                return state;
            }
            AppState {
                tree: state.tree.add_root_domain(name),
                ..state
            }
        }

        Action::AddSubdomain { parent, name } => {
            if !can_add_subdomain(&state, &parent, &name) {
                return state;
            }
            AppState {
                tree: state.tree.add_subdomain(&parent, name),
                ..state
            }
        }

        Action::AddDocument { path, document } => {
            if state.documents.contains(&path, &document.name) {
                return state;
            }
            AppState {
                documents: state.documents.attach(&path, document),
                ..state
            }
        }

        Action::SetPath(path) => AppState {
            current_path: path,
            ..state
        },

        Action::SetConfig(patch) => AppState {
            config: state.config.merge(&patch),
            ..state
        },

        Action::ClearDocuments => AppState {
            documents: state.documents.clear_all(),
            ..state
        },

        Action::Reset => AppState::with_config(state.config),

        Action::SetLoading(loading) => AppState { loading, ..state },

        Action::SetError(error) => AppState { error, ..state },
    }
}

fn can_add_subdomain(state: &AppState, parent: &DomainPath, name: &DomainName) -> bool {
    !parent.is_root()
        && parent.depth() < state.config.max_depth as usize
        && state.tree.contains_path(parent)
        && !state.tree.children_of(parent).contains(name)
}
