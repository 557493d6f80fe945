//! persistence::memory
//!
//! In-process snapshot storage.
//!
//! Nothing survives the process. Used for tests and when the config selects
//! the `memory` provider. Failure injection lets tests exercise the
//! "save failed, keep going" path.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use super::traits::{PersistenceError, PersistenceGateway, Snapshot};

/// In-memory snapshot storage.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    snapshot: Mutex<Option<Snapshot>>,
    corrupt: AtomicBool,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
    clears: AtomicUsize,
}

impl MemoryGateway {
    /// An empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway that already holds `snapshot`.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Mutex::new(Some(snapshot)),
            ..Self::default()
        }
    }

    /// Make the next loads report corrupt data until cleared.
    pub fn set_corrupt(&self, corrupt: bool) {
        self.corrupt.store(corrupt, Ordering::SeqCst);
    }

    /// Make saves fail.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// The currently stored snapshot.
    pub fn stored(&self) -> Option<Snapshot> {
        self.lock().clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Number of clears.
    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Snapshot>> {
        // A poisoned lock only means a test panicked mid-save; the data is still usable.
        self.snapshot.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl PersistenceGateway for MemoryGateway {
    fn load(&self) -> Result<Option<Snapshot>, PersistenceError> {
        if self.corrupt.load(Ordering::SeqCst) {
            return Err(PersistenceError::Corrupt("injected corruption".into()));
        }
        Ok(self.lock().clone())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(PersistenceError::Write("injected save failure".into()));
        }
        *self.lock() = Some(snapshot.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn clear(&self) -> Result<(), PersistenceError> {
        *self.lock() = None;
        self.corrupt.store(false, Ordering::SeqCst);
        self.clears.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::AppState;

    #[test]
    fn save_load_clear() {
        let gateway = MemoryGateway::new();
        assert!(gateway.load().unwrap().is_none());

        let snapshot = Snapshot::capture(&AppState::default());
        gateway.save(&snapshot).unwrap();
        assert_eq!(gateway.load().unwrap(), Some(snapshot));
        assert_eq!(gateway.save_count(), 1);

        gateway.clear().unwrap();
        assert!(gateway.load().unwrap().is_none());
        assert_eq!(gateway.clear_count(), 1);
    }

    #[test]
    fn injected_failures() {
        let gateway = MemoryGateway::new();
        gateway.set_fail_saves(true);
        assert!(gateway
            .save(&Snapshot::capture(&AppState::default()))
            .is_err());
        assert_eq!(gateway.save_count(), 0);

        gateway.set_corrupt(true);
        assert!(matches!(gateway.load(), Err(PersistenceError::Corrupt(_))));
        gateway.clear().unwrap();
        assert!(gateway.load().unwrap().is_none());
    }
}
