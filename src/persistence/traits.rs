//! persistence::traits
//!
//! Persistence gateway trait and the snapshot it stores.
//!
//! # Snapshot schema
//!
//! Snapshots are self-describing: every one carries `kind` and
//! `schema_version`, and parsing rejects unknown fields. Parsing checks
//! the envelope first so a snapshot from a newer version is reported as
//! such rather than as a confusing field error.
//!
//! ```json
//! {
//!   "kind": "domaintree.snapshot",
//!   "schema_version": 1,
//!   "saved_at": "2024-01-01T00:00:00Z",
//!   "tree": { "items": ["A", "B", "C"], "children": { "A": ["A1"] } },
//!   "documents": { "A": [{ "name": "a.md", "content": "..." }] },
//!   "config": { "max_depth": 10 }
//! }
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::config::TreeConfig;
use crate::core::documents::DocumentStore;
use crate::core::state::AppState;
use crate::core::tree::DomainTree;
use crate::core::types::{DomainName, UtcTimestamp};

/// The kind identifier for snapshots.
pub const SNAPSHOT_KIND: &str = "domaintree.snapshot";

/// Current schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Failed to read from the store.
    #[error("failed to read saved state: {0}")]
    Read(String),

    /// Failed to write to the store.
    #[error("failed to write saved state: {0}")]
    Write(String),

    /// Saved state exists but cannot be used.
    #[error("saved state is corrupt: {0}")]
    Corrupt(String),

    /// Provider not available or not configured.
    #[error("persistence provider not available: {0}")]
    ProviderNotAvailable(String),
}

/// The persisted subset of [`AppState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Snapshot {
    pub kind: String,
    pub schema_version: u32,
    pub saved_at: UtcTimestamp,
    #[serde(default)]
    pub tree: DomainTree,
    #[serde(default)]
    pub documents: DocumentStore,
    #[serde(default)]
    pub config: TreeConfig,
}

#[derive(Debug, Deserialize)]
struct SnapshotEnvelope {
    kind: String,
    schema_version: u32,
}

impl Snapshot {
    /// Capture the persisted part of `state`.
    pub fn capture(state: &AppState) -> Self {
        Self {
            kind: SNAPSHOT_KIND.to_string(),
            schema_version: SCHEMA_VERSION,
            saved_at: UtcTimestamp::now(),
            tree: state.tree.clone(),
            documents: state.documents.clone(),
            config: state.config,
        }
    }

    /// Parse snapshot JSON with version dispatch.
    ///
    /// A key that does not decode anywhere in the tree or documents makes
    /// the whole snapshot corrupt; nothing is partially accepted.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Corrupt` if:
    /// - The JSON is malformed
    /// - The `kind` field doesn't match [`SNAPSHOT_KIND`]
    /// - The `schema_version` is not supported
    /// - Any key, name, or value is invalid
    pub fn parse(json: &str) -> Result<Self, PersistenceError> {
        let envelope: SnapshotEnvelope =
            serde_json::from_str(json).map_err(|e| PersistenceError::Corrupt(e.to_string()))?;

        if envelope.kind != SNAPSHOT_KIND {
            return Err(PersistenceError::Corrupt(format!(
                "invalid kind '{}', expected '{}'",
                envelope.kind, SNAPSHOT_KIND
            )));
        }

        match envelope.schema_version {
            1 => {
                let snapshot: Snapshot = serde_json::from_str(json)
                    .map_err(|e| PersistenceError::Corrupt(e.to_string()))?;
                if snapshot.config.max_depth == 0 {
                    return Err(PersistenceError::Corrupt(
                        "max_depth must be positive".to_string(),
                    ));
                }
                Ok(snapshot)
            }
            v => Err(PersistenceError::Corrupt(format!(
                "unsupported schema version {}, supported: {}",
                v, SCHEMA_VERSION
            ))),
        }
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, PersistenceError> {
        serde_json::to_string_pretty(self).map_err(|e| PersistenceError::Write(e.to_string()))
    }

    /// Whether this snapshot holds a usable taxonomy.
    ///
    /// Fewer than three distinct root domains means setup never completed.
    /// Duplicates are not counted since [`Snapshot::into_state`] drops them.
    pub fn is_complete(&self) -> bool {
        let distinct: HashSet<&DomainName> = self.tree.items.iter().collect();
        distinct.len() >= crate::core::tree::MIN_ROOT_DOMAINS
    }

    /// Build the state this snapshot describes.
    ///
    /// Duplicate siblings and duplicate document names are dropped, keeping
    /// the first occurrence. Orphaned entries are kept.
    pub fn into_state(self) -> AppState {
        AppState {
            tree: self.tree.normalized(),
            documents: self.documents.normalized(),
            config: self.config,
            ..AppState::default()
        }
    }
}

/// Load/save/clear of the persisted snapshot.
///
/// Implementations must be thread-safe (Send + Sync).
pub trait PersistenceGateway: Send + Sync {
    /// Load the saved snapshot.
    ///
    /// Returns `Ok(None)` if nothing has been saved.
    /// Returns `Err(PersistenceError::Corrupt)` if saved data cannot be used.
    fn load(&self) -> Result<Option<Snapshot>, PersistenceError>;

    /// Save a snapshot, replacing any previous one.
    fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError>;

    /// Remove any saved snapshot.
    ///
    /// Returns `Ok(())` even if nothing was saved.
    fn clear(&self) -> Result<(), PersistenceError>;
}
