//! core::lock
//!
//! Exclusive lock on the data directory.
//!
//! # Architecture
//!
//! Each `dt` invocation applies one action and saves the result. The lock
//! makes sure two invocations never interleave their load/save cycles, so
//! actions are applied strictly one after another even across processes.
//!
//! # Invariants
//!
//! - Lock must be held from load until the final save
//! - Lock is automatically released on drop (RAII pattern)
//! - Lock acquisition is non-blocking (fails fast if locked)
//!
//! # Example
//!
//! ```ignore
//! use domaintree::core::lock::DataLock;
//! use domaintree::core::paths::DataPaths;
//!
//! let lock = DataLock::acquire(&paths)?;
//! // load, apply, save
//! drop(lock);
//! ```

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

use crate::core::paths::DataPaths;

/// Errors from locking operations.
#[derive(Debug, Error)]
pub enum LockError {
    /// Another process already holds the lock.
    #[error("data directory is locked by another dt process")]
    AlreadyLocked,

    /// Failed to create lock file or directory.
    #[error("failed to create lock: {0}")]
    CreateFailed(String),

    /// Failed to acquire the OS lock.
    #[error("failed to acquire lock: {0}")]
    AcquireFailed(String),

    /// Failed to release the lock.
    #[error("failed to release lock: {0}")]
    ReleaseFailed(String),
}

/// An exclusive lock on the data directory.
///
/// Released when dropped.
#[derive(Debug)]
pub struct DataLock {
    path: PathBuf,
    /// `Some` while the lock is held.
    file: Option<File>,
}

impl DataLock {
    /// Attempt to acquire the lock.
    ///
    /// Uses OS-level file locking via `fs2`. Non-blocking: if another
    /// process holds the lock this returns `LockError::AlreadyLocked`
    /// immediately.
    ///
    /// # Errors
    ///
    /// - [`LockError::AlreadyLocked`] if another process holds the lock
    /// - [`LockError::CreateFailed`] if the lock file cannot be created
    /// - [`LockError::AcquireFailed`] if the OS lock cannot be acquired
    pub fn acquire(paths: &DataPaths) -> Result<Self, LockError> {
        fs::create_dir_all(paths.root()).map_err(|e| {
            LockError::CreateFailed(format!("cannot create {}: {}", paths.root().display(), e))
        })?;

        let path = paths.lock_path();

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| {
                LockError::CreateFailed(format!("cannot open {}: {}", path.display(), e))
            })?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(Self {
                path,
                file: Some(file),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => Err(LockError::AlreadyLocked),
            Err(e) => Err(LockError::AcquireFailed(e.to_string())),
        }
    }

    /// Whether this guard still holds the lock.
    pub fn is_held(&self) -> bool {
        self.file.is_some()
    }

    /// Get the path to the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the lock before the guard is dropped.
    pub fn release(&mut self) -> Result<(), LockError> {
        if let Some(file) = self.file.take() {
            file.unlock()
                .map_err(|e| LockError::ReleaseFailed(e.to_string()))?;
        }
        Ok(())
    }
}

impl Drop for DataLock {
    fn drop(&mut self) {
        // Best-effort release on drop
        if let Some(file) = self.file.take() {
            let _ = file.unlock();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_paths(temp: &TempDir) -> DataPaths {
        DataPaths::new(temp.path().join("data"))
    }

    #[test]
    fn acquire_creates_directory() {
        let temp = TempDir::new().expect("create temp dir");
        let paths = test_paths(&temp);
        assert!(!paths.root().exists());

        let lock = DataLock::acquire(&paths).expect("acquire lock");
        assert!(lock.is_held());
        assert!(paths.root().exists());
        assert_eq!(lock.path(), paths.lock_path());
    }

    #[test]
    fn second_acquire_fails() {
        let temp = TempDir::new().expect("create temp dir");
        let paths = test_paths(&temp);

        let _lock = DataLock::acquire(&paths).expect("first acquire");
        let result = DataLock::acquire(&paths);
        assert!(matches!(result, Err(LockError::AlreadyLocked)));
    }

    #[test]
    fn released_on_drop() {
        let temp = TempDir::new().expect("create temp dir");
        let paths = test_paths(&temp);

        {
            let _lock = DataLock::acquire(&paths).expect("first acquire");
        }

        let lock = DataLock::acquire(&paths).expect("second acquire");
        assert!(lock.is_held());
    }

    #[test]
    fn release_is_idempotent() {
        let temp = TempDir::new().expect("create temp dir");
        let paths = test_paths(&temp);

        let mut lock = DataLock::acquire(&paths).expect("acquire");
        lock.release().expect("first release");
        lock.release().expect("second release");
        assert!(!lock.is_held());

        DataLock::acquire(&paths).expect("reacquire");
    }

    #[test]
    fn error_display_formatting() {
        assert!(LockError::AlreadyLocked.to_string().contains("locked"));
        assert!(LockError::CreateFailed("x".into())
            .to_string()
            .contains("create"));
    }
}
