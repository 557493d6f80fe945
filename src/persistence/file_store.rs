//! persistence::file_store
//!
//! File-based snapshot storage.
//!
//! - The snapshot is stored as pretty JSON at `<data_dir>/state.json`
//! - All writes are atomic (write to temp file, then rename)
//! - Clearing removes the file; a missing file loads as "nothing saved"
//!
//! # Example
//!
//! ```ignore
//! use domaintree::persistence::{FileGateway, PersistenceGateway, Snapshot};
//!
//! let gateway = FileGateway::with_path(paths.state_path());
//! gateway.save(&Snapshot::capture(&state))?;
//! let restored = gateway.load()?;
//! ```

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use super::traits::{PersistenceError, PersistenceGateway, Snapshot};

/// File-based snapshot storage.
#[derive(Debug)]
pub struct FileGateway {
    /// Path to the snapshot file
    path: PathBuf,
}

impl FileGateway {
    /// Create a gateway storing the snapshot at `path`.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Get the path to the snapshot file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl PersistenceGateway for FileGateway {
    fn load(&self) -> Result<Option<Snapshot>, PersistenceError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            PersistenceError::Read(format!("cannot read {}: {}", self.path.display(), e))
        })?;

        Snapshot::parse(&content).map(Some)
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| PersistenceError::Write(format!("cannot create directory: {}", e)))?;
        }

        let content = snapshot.to_json()?;

        let temp_path = self.path.with_extension("json.tmp");

        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(|e| {
                    PersistenceError::Write(format!("cannot create temp file: {}", e))
                })?;

            file.write_all(content.as_bytes())
                .map_err(|e| PersistenceError::Write(format!("cannot write snapshot: {}", e)))?;

            file.sync_all()
                .map_err(|e| PersistenceError::Write(format!("cannot sync to disk: {}", e)))?;
        }

        fs::rename(&temp_path, &self.path)
            .map_err(|e| PersistenceError::Write(format!("cannot rename temp file: {}", e)))?;

        Ok(())
    }

    fn clear(&self) -> Result<(), PersistenceError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PersistenceError::Write(format!(
                "cannot remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}
