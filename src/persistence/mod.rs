//! persistence
//!
//! Storage of the persisted snapshot.
//!
//! # Architecture
//!
//! Snapshots are stored through the [`PersistenceGateway`] trait, which has
//! two implementations:
//!
//! - [`FileGateway`]: Stores pretty JSON in `<data_dir>/state.json` (default)
//! - [`MemoryGateway`]: Keeps the snapshot in process memory
//!
//! The session cursor (the CLI's current path) is stored separately by
//! [`session`]; it is not part of the snapshot.
//!
//! # Provider Selection
//!
//! Use [`create_gateway`] to create a gateway based on configuration:
//!
//! ```ignore
//! use domaintree::persistence::create_gateway;
//!
//! let gateway = create_gateway(config.persistence_provider(), &paths)?;
//! ```

mod file_store;
mod memory;
pub mod session;
mod traits;

pub use file_store::FileGateway;
pub use memory::MemoryGateway;
pub use traits::{PersistenceError, PersistenceGateway, Snapshot, SCHEMA_VERSION, SNAPSHOT_KIND};

use crate::core::paths::DataPaths;

/// The default persistence provider name.
pub const DEFAULT_PROVIDER: &str = "file";

/// Create a gateway based on the provider name.
///
/// # Providers
///
/// - `"file"` (default): [`FileGateway`] at `<data_dir>/state.json`
/// - `"memory"`: [`MemoryGateway`], nothing survives the process
///
/// # Errors
///
/// Returns `PersistenceError::ProviderNotAvailable` for an unknown name.
pub fn create_gateway(
    provider: &str,
    paths: &DataPaths,
) -> Result<Box<dyn PersistenceGateway>, PersistenceError> {
    match provider {
        "file" => Ok(Box::new(FileGateway::with_path(paths.state_path()))),
        "memory" => Ok(Box::new(MemoryGateway::new())),
        other => Err(PersistenceError::ProviderNotAvailable(format!(
            "unknown persistence provider: '{}' (valid: file, memory)",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn create_file_gateway() {
        let temp = tempfile::TempDir::new().expect("create temp dir");
        let paths = DataPaths::new(temp.path().to_path_buf());
        let gateway = create_gateway("file", &paths).expect("create file gateway");
        assert!(gateway.load().expect("load").is_none());
    }

    #[test]
    fn create_memory_gateway() {
        let paths = DataPaths::new(PathBuf::from("/unused"));
        let gateway = create_gateway("memory", &paths).expect("create memory gateway");
        assert!(gateway.load().expect("load").is_none());
    }

    #[test]
    fn create_unknown_provider() {
        let paths = DataPaths::new(PathBuf::from("/unused"));
        match create_gateway("indexeddb", &paths) {
            Err(PersistenceError::ProviderNotAvailable(msg)) => {
                assert!(msg.contains("indexeddb"));
            }
            Err(e) => panic!("unexpected error type: {:?}", e),
            Ok(_) => panic!("expected error"),
        }
    }

    #[test]
    fn default_provider_constant() {
        assert_eq!(DEFAULT_PROVIDER, "file");
    }
}
