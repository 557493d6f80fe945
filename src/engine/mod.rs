//! engine
//!
//! Owns the current snapshot and drives it through the state machine.
//!
//! # Lifecycle
//!
//! 1. [`Engine::new`] starts from defaults with `initialized == false`
//! 2. [`Engine::bootstrap`] loads the saved snapshot (the only step before
//!    the state is usable); `loading` is set for its duration
//! 3. Each operation validates, dispatches one [`Action`], notifies
//!    subscribers with the new snapshot, then saves it
//!
//! # Persistence policy
//!
//! A save happens after the new snapshot is in place and subscribers have
//! seen it. A failed save is logged and remembered in
//! [`Engine::last_save_error`]; the in-memory state is never rolled back.
//! Nothing is saved before bootstrap completes.
//!
//! # Validation
//!
//! [`apply`] silently ignores actions whose preconditions fail. The
//! operations here check the same preconditions first and return an
//! [`EngineError`] so the caller can tell the user what happened.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::config::{ConfigPatch, TreeConfig};
use crate::core::navigation;
use crate::core::state::{apply, Action, AppState};
use crate::core::tree::{DomainTree, TreeError};
use crate::core::types::{Document, DomainName, DomainPath};
use crate::persistence::{PersistenceError, PersistenceGateway, Snapshot};

/// Message stored in [`AppState::error`] when saved data had to be discarded.
pub const LOAD_FAILURE_MESSAGE: &str =
    "Failed to load saved data. Starting with default settings.";

/// Errors surfaced to the caller before an action is dispatched.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    InvalidSetup(#[from] TreeError),

    #[error("domain '{0}' already exists here")]
    DuplicateDomain(DomainName),

    #[error("no domain selected; subdomains need a parent")]
    NoCurrentDomain,

    #[error("maximum depth of {max_depth} reached")]
    DepthExceeded { max_depth: u32 },

    #[error("no domain named '{0}' here")]
    UnknownDomain(DomainName),

    #[error("document '{0}' is already attached here")]
    DuplicateDocument(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("not initialized; bootstrap has not run")]
    NotInitialized,

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// How bootstrap resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootOutcome {
    /// A complete snapshot was restored.
    Restored,
    /// Nothing usable was saved; the taxonomy needs setup.
    NeedsSetup,
    /// Saved data was corrupt and was discarded.
    Recovered { reason: String },
}

type Subscriber = Box<dyn Fn(&AppState)>;

/// The state owner.
pub struct Engine {
    state: AppState,
    gateway: Box<dyn PersistenceGateway>,
    initialized: bool,
    subscribers: Vec<Subscriber>,
    last_save_error: Option<String>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.state)
            .field("initialized", &self.initialized)
            .field("subscribers", &self.subscribers.len())
            .field("last_save_error", &self.last_save_error)
            .finish()
    }
}

impl Engine {
    /// A new engine over `gateway`.
    ///
    /// `fresh_config` is the tree config used when no saved state exists.
    pub fn new(gateway: Box<dyn PersistenceGateway>, fresh_config: TreeConfig) -> Self {
        Self {
            state: AppState::with_config(fresh_config),
            gateway,
            initialized: false,
            subscribers: Vec::new(),
            last_save_error: None,
        }
    }

    /// The current snapshot.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Whether bootstrap has completed.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether the taxonomy still needs its initial domains.
    pub fn needs_setup(&self) -> bool {
        self.state.tree.items.is_empty()
    }

    /// The most recent save failure, if the last save failed.
    pub fn last_save_error(&self) -> Option<&str> {
        self.last_save_error.as_deref()
    }

    /// Register a callback run with every new snapshot.
    pub fn subscribe(&mut self, subscriber: impl Fn(&AppState) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Load the saved snapshot.
    ///
    /// - A complete snapshot is restored.
    /// - No snapshot, or one with fewer than three root domains, clears the
    ///   store and leaves the defaults in place for setup.
    /// - A corrupt snapshot is discarded entirely: the store is cleared,
    ///   defaults stay in place, and [`AppState::error`] is set.
    ///
    /// All three outcomes leave the engine initialized.
    pub fn bootstrap(&mut self) -> BootOutcome {
        self.dispatch_local(Action::SetLoading(true));

        let outcome = match self.gateway.load() {
            Ok(Some(snapshot)) if snapshot.is_complete() => {
                info!(
                    roots = snapshot.tree.items.len(),
                    documents = snapshot.documents.document_count(),
                    "restored saved state"
                );
                let restored = AppState {
                    loading: true,
                    ..snapshot.into_state()
                };
                self.replace(restored);
                BootOutcome::Restored
            }
            Ok(_) => {
                info!("no valid saved state, setup required");
                self.clear_store();
                BootOutcome::NeedsSetup
            }
            Err(e) => {
                warn!(error = %e, "discarding saved state");
                self.dispatch_local(Action::SetError(Some(LOAD_FAILURE_MESSAGE.to_string())));
                self.clear_store();
                BootOutcome::Recovered {
                    reason: e.to_string(),
                }
            }
        };

        self.dispatch_local(Action::SetLoading(false));
        self.initialized = true;
        outcome
    }

    /// Apply `action`, notify subscribers, and save.
    ///
    /// Never fails. Saving only happens once initialized and only for
    /// actions that can change the persisted part of the state.
    pub fn dispatch(&mut self, action: Action) -> &AppState {
        let persist = self.initialized && action.touches_snapshot();
        self.dispatch_local(action);
        if persist {
            self.save();
        }
        &self.state
    }

    fn dispatch_local(&mut self, action: Action) {
        debug!(action = action.kind(), "dispatch");
        let next = apply(self.state.clone(), action);
        self.replace(next);
    }

    fn replace(&mut self, next: AppState) {
        self.state = next;
        for subscriber in &self.subscribers {
            subscriber(&self.state);
        }
    }

    fn save(&mut self) {
        match self.gateway.save(&Snapshot::capture(&self.state)) {
            Ok(()) => self.last_save_error = None,
            Err(e) => {
                warn!(error = %e, "failed to save state; continuing with in-memory state");
                self.last_save_error = Some(e.to_string());
            }
        }
    }

    fn clear_store(&mut self) {
        if let Err(e) = self.gateway.clear() {
            warn!(error = %e, "failed to clear saved state");
        }
    }

    fn ensure_initialized(&self) -> Result<(), EngineError> {
        if self.initialized {
            Ok(())
        } else {
            Err(EngineError::NotInitialized)
        }
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Replace the root domains with `names`.
    ///
    /// # Errors
    ///
    /// `InvalidSetup` if fewer than three distinct names are given. The
    /// message is also recorded in [`AppState::error`].
    pub fn setup(&mut self, names: Vec<DomainName>) -> Result<(), EngineError> {
        self.ensure_initialized()?;
        if let Err(e) = DomainTree::new().replace_roots(names.clone()) {
            self.dispatch(Action::SetError(Some(e.to_string())));
            return Err(e.into());
        }
        self.dispatch(Action::SetInitialDomains(names));
        Ok(())
    }

    /// Add a root domain.
    pub fn add_domain(&mut self, name: DomainName) -> Result<(), EngineError> {
        self.ensure_initialized()?;
        if self.state.tree.items.contains(&name) {
            return Err(EngineError::DuplicateDomain(name));
        }
        self.dispatch(Action::AddDomain(name));
        Ok(())
    }

    /// Add a subdomain under the current path.
    pub fn add_subdomain(&mut self, name: DomainName) -> Result<(), EngineError> {
        self.ensure_initialized()?;
        let parent = self.state.current_path.clone();
        if navigation::current_domain(&self.state).is_none() {
            return Err(EngineError::NoCurrentDomain);
        }
        if !navigation::can_descend(&parent, &self.state.config) {
            return Err(EngineError::DepthExceeded {
                max_depth: self.state.config.max_depth,
            });
        }
        if navigation::domain_exists(&self.state, &name) {
            return Err(EngineError::DuplicateDomain(name));
        }
        self.dispatch(Action::AddSubdomain { parent, name });
        Ok(())
    }

    /// Add `name` where the user is: a root domain at the root, otherwise
    /// a subdomain of the current path.
    pub fn add_here(&mut self, name: DomainName) -> Result<(), EngineError> {
        if self.state.current_path.is_root() {
            self.add_domain(name)
        } else {
            self.add_subdomain(name)
        }
    }

    /// Attach a document at the current path.
    pub fn add_document(&mut self, document: Document) -> Result<(), EngineError> {
        self.ensure_initialized()?;
        let path = self.state.current_path.clone();
        if self.state.documents.contains(&path, &document.name) {
            return Err(EngineError::DuplicateDocument(document.name));
        }
        self.dispatch(Action::AddDocument { path, document });
        Ok(())
    }

    /// Jump to `level` along the current path (0 is the root).
    ///
    /// Levels deeper than the current path clamp to it.
    pub fn navigate_to(&mut self, level: usize) -> Result<&DomainPath, EngineError> {
        self.ensure_initialized()?;
        let target = navigation::navigate_to(&self.state.current_path, level);
        self.dispatch(Action::SetPath(target));
        Ok(&self.state.current_path)
    }

    /// Move up `steps` levels, stopping at the root.
    pub fn go_up(&mut self, steps: usize) -> Result<&DomainPath, EngineError> {
        let level = self.state.current_path.depth().saturating_sub(steps);
        self.navigate_to(level)
    }

    /// Descend into a domain visible at the current path.
    pub fn select_domain(&mut self, name: DomainName) -> Result<&DomainPath, EngineError> {
        self.ensure_initialized()?;
        if !navigation::domain_exists(&self.state, &name) {
            return Err(EngineError::UnknownDomain(name));
        }
        let target = navigation::select_domain(&self.state.current_path, name);
        self.dispatch(Action::SetPath(target));
        Ok(&self.state.current_path)
    }

    /// Move to `path` if it is reachable. Returns whether it moved.
    pub fn restore_path(&mut self, path: DomainPath) -> Result<bool, EngineError> {
        self.ensure_initialized()?;
        if !self.state.tree.contains_path(&path) {
            return Ok(false);
        }
        self.dispatch(Action::SetPath(path));
        Ok(true)
    }

    /// Shallow-merge into the tree config.
    pub fn set_config(&mut self, patch: ConfigPatch) -> Result<(), EngineError> {
        self.ensure_initialized()?;
        if patch.max_depth == Some(0) {
            return Err(EngineError::InvalidConfig(
                "max_depth must be a positive integer".into(),
            ));
        }
        self.dispatch(Action::SetConfig(patch));
        Ok(())
    }

    /// Drop every attached document.
    pub fn clear_documents(&mut self) -> Result<(), EngineError> {
        self.ensure_initialized()?;
        self.dispatch(Action::ClearDocuments);
        Ok(())
    }

    /// Clear saved state and return to defaults, keeping the tree config
    /// in memory.
    ///
    /// The store stays empty afterwards: nothing is saved after the reset.
    pub fn reset(&mut self) -> Result<(), EngineError> {
        self.ensure_initialized()?;
        self.gateway.clear()?;
        self.dispatch_local(Action::Reset);
        info!("state reset");
        Ok(())
    }

    /// Clear the error message.
    pub fn dismiss_error(&mut self) {
        self.dispatch(Action::SetError(None));
    }
}
