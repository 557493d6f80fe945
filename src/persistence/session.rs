//! persistence::session
//!
//! The CLI's current path between invocations.
//!
//! Each `dt` command runs in a fresh process, so the current path would be
//! lost after every command. The cursor keeps it in `<data_dir>/session.json`
//! as an encoded [`PathKey`]. It is deliberately separate from the snapshot:
//! the snapshot holds the taxonomy, the cursor holds where one user is
//! looking at it.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::traits::PersistenceError;
use crate::core::codec::{encode, PathKey};
use crate::core::types::DomainPath;

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct CursorFile {
    current: PathKey,
}

/// File-backed session cursor.
#[derive(Debug)]
pub struct SessionCursor {
    path: PathBuf,
}

impl SessionCursor {
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// The saved current path, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Corrupt` if the file exists but does not
    /// hold a valid key.
    pub fn load(&self) -> Result<Option<DomainPath>, PersistenceError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .map_err(|e| PersistenceError::Read(format!("cannot read session: {}", e)))?;
        let cursor: CursorFile = serde_json::from_str(&content)
            .map_err(|e| PersistenceError::Corrupt(format!("session: {}", e)))?;
        cursor
            .current
            .to_path()
            .map(Some)
            .map_err(|e| PersistenceError::Corrupt(e.to_string()))
    }

    /// Save `current` as the current path.
    pub fn save(&self, current: &DomainPath) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| PersistenceError::Write(format!("cannot create directory: {}", e)))?;
        }
        let content = serde_json::to_string(&CursorFile {
            current: encode(current),
        })
        .map_err(|e| PersistenceError::Write(e.to_string()))?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, content)
            .map_err(|e| PersistenceError::Write(format!("cannot write session: {}", e)))?;
        fs::rename(&temp_path, &self.path)
            .map_err(|e| PersistenceError::Write(format!("cannot rename temp file: {}", e)))?;
        Ok(())
    }

    /// Forget the saved current path.
    pub fn clear(&self) -> Result<(), PersistenceError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PersistenceError::Write(format!(
                "cannot remove session: {}",
                e
            ))),
        }
    }
}
