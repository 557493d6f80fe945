//! core::paths
//!
//! Centralized path routing for domaintree storage locations.
//!
//! # Storage Layout
//!
//! All data is stored under one data directory (default `~/.domaintree/`):
//! - `state.json` - Persisted snapshot (tree, documents, tree config)
//! - `session.json` - Current path of the CLI session
//! - `lock` - Exclusive lock file
//!
//! No code outside this module should join file names onto the data
//! directory.
//!
//! # Example
//!
//! ```
//! use domaintree::core::paths::DataPaths;
//! use std::path::PathBuf;
//!
//! let paths = DataPaths::new(PathBuf::from("/home/me/.domaintree"));
//! assert_eq!(
//!     paths.state_path(),
//!     PathBuf::from("/home/me/.domaintree/state.json")
//! );
//! ```

use std::path::{Path, PathBuf};

/// Storage locations under a data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    /// Create paths rooted at `root`.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The data directory itself.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/state.json`
    pub fn state_path(&self) -> PathBuf {
        self.root.join("state.json")
    }

    /// `<root>/session.json`
    pub fn session_path(&self) -> PathBuf {
        self.root.join("session.json")
    }

    /// `<root>/lock`
    pub fn lock_path(&self) -> PathBuf {
        self.root.join("lock")
    }
}
