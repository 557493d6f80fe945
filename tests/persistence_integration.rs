//! Integration tests for the persistence layer.
//!
//! These tests exercise the engine against the file gateway, the session
//! cursor, and the data lock in a temporary data directory.

use std::fs;

use tempfile::TempDir;

use domaintree::core::config::TreeConfig;
use domaintree::core::lock::{DataLock, LockError};
use domaintree::core::paths::DataPaths;
use domaintree::core::types::{Document, DomainName, DomainPath};
use domaintree::engine::{BootOutcome, Engine, LOAD_FAILURE_MESSAGE};
use domaintree::persistence::session::SessionCursor;
use domaintree::persistence::{create_gateway, PersistenceGateway, Snapshot, SNAPSHOT_KIND};

// =============================================================================
// Test Helpers
// =============================================================================

struct DataDir {
    _dir: TempDir,
    paths: DataPaths,
}

impl DataDir {
    fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let paths = DataPaths::new(dir.path().join("data"));
        Self { _dir: dir, paths }
    }

    fn engine(&self) -> Engine {
        let gateway = create_gateway("file", &self.paths).expect("file gateway");
        let mut engine = Engine::new(gateway, TreeConfig::default());
        engine.bootstrap();
        engine
    }

    fn engine_with_outcome(&self) -> (Engine, BootOutcome) {
        let gateway = create_gateway("file", &self.paths).expect("file gateway");
        let mut engine = Engine::new(gateway, TreeConfig::default());
        let outcome = engine.bootstrap();
        (engine, outcome)
    }
}

fn name(s: &str) -> DomainName {
    DomainName::new(s).expect("valid name")
}

fn names(list: &[&str]) -> Vec<DomainName> {
    list.iter().map(|s| name(s)).collect()
}

// =============================================================================
// Engine + FileGateway
// =============================================================================

#[test]
fn state_survives_restart() {
    let data = DataDir::new();

    {
        let mut engine = data.engine();
        engine.setup(names(&["Physics", "Chemistry", "Biology"])).unwrap();
        engine.select_domain(name("Physics")).unwrap();
        engine.add_subdomain(name("I/O")).unwrap();
        engine.select_domain(name("I/O")).unwrap();
        engine
            .add_document(Document::new("notes.md", "# notes").unwrap())
            .unwrap();
    }

    let (engine, outcome) = data.engine_with_outcome();
    assert_eq!(outcome, BootOutcome::Restored);

    let state = engine.state();
    assert_eq!(state.tree.items, names(&["Physics", "Chemistry", "Biology"]));
    let physics = DomainPath::parse_segments(["Physics"]).unwrap();
    assert_eq!(state.tree.children_of(&physics), names(&["I/O"]).as_slice());

    let io = physics.child(name("I/O"));
    let docs = state.documents.list_at(&io);
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].content, "# notes");

    // The current path is never part of the snapshot.
    assert!(state.current_path.is_root());
}

#[test]
fn saved_file_has_schema_envelope() {
    let data = DataDir::new();
    data.engine().setup(names(&["A", "B", "C"])).unwrap();

    let raw = fs::read_to_string(data.paths.state_path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["kind"], SNAPSHOT_KIND);
    assert_eq!(json["schema_version"], 1);
    assert_eq!(json["config"]["max_depth"], 10);
    assert!(json.get("current_path").is_none());
}

#[test]
fn corrupt_file_boots_to_defaults_and_is_cleared() {
    let data = DataDir::new();
    fs::create_dir_all(data.paths.root()).unwrap();
    fs::write(data.paths.state_path(), "{\"kind\": \"something-else\"").unwrap();

    let (engine, outcome) = data.engine_with_outcome();
    assert!(matches!(outcome, BootOutcome::Recovered { .. }));
    assert!(engine.needs_setup());
    assert_eq!(engine.state().error.as_deref(), Some(LOAD_FAILURE_MESSAGE));
    assert!(!data.paths.state_path().exists());
}

#[test]
fn unsupported_schema_version_is_discarded() {
    let data = DataDir::new();
    data.engine().setup(names(&["A", "B", "C"])).unwrap();

    let raw = fs::read_to_string(data.paths.state_path()).unwrap();
    let mut json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    json["schema_version"] = serde_json::json!(99);
    fs::write(data.paths.state_path(), json.to_string()).unwrap();

    let (engine, outcome) = data.engine_with_outcome();
    assert!(matches!(outcome, BootOutcome::Recovered { .. }));
    assert!(engine.needs_setup());
}

#[test]
fn fewer_than_three_roots_means_setup() {
    let data = DataDir::new();
    let gateway = create_gateway("file", &data.paths).unwrap();
    let mut partial = Snapshot::capture(&Default::default());
    partial.tree = partial.tree.add_root_domain(name("Lonely"));
    gateway.save(&partial).unwrap();

    let (engine, outcome) = data.engine_with_outcome();
    assert_eq!(outcome, BootOutcome::NeedsSetup);
    assert!(engine.needs_setup());
    assert!(engine.state().error.is_none());
    assert!(!data.paths.state_path().exists());
}

#[test]
fn reset_removes_saved_state() {
    let data = DataDir::new();
    let mut engine = data.engine();
    engine.setup(names(&["A", "B", "C"])).unwrap();
    assert!(data.paths.state_path().exists());

    engine.reset().unwrap();
    assert!(!data.paths.state_path().exists());
    drop(engine);

    let (_engine, outcome) = data.engine_with_outcome();
    assert_eq!(outcome, BootOutcome::NeedsSetup);
}

#[test]
fn config_change_persists() {
    let data = DataDir::new();
    {
        let mut engine = data.engine();
        engine.setup(names(&["A", "B", "C"])).unwrap();
        engine
            .set_config(domaintree::core::config::ConfigPatch { max_depth: Some(2) })
            .unwrap();
    }
    assert_eq!(data.engine().state().config.max_depth, 2);
}

// =============================================================================
// Session cursor
// =============================================================================

#[test]
fn cursor_restores_reachable_path() {
    let data = DataDir::new();
    let cursor = SessionCursor::with_path(data.paths.session_path());
    {
        let mut engine = data.engine();
        engine.setup(names(&["A", "B", "C"])).unwrap();
        engine.select_domain(name("B")).unwrap();
        cursor.save(&engine.state().current_path).unwrap();
    }

    let mut engine = data.engine();
    let saved = cursor.load().unwrap().unwrap();
    assert!(engine.restore_path(saved).unwrap());
    assert_eq!(
        engine.state().current_path,
        DomainPath::parse_segments(["B"]).unwrap()
    );
}

#[test]
fn cursor_to_missing_path_is_refused() {
    let data = DataDir::new();
    let cursor = SessionCursor::with_path(data.paths.session_path());
    cursor
        .save(&DomainPath::parse_segments(["Gone"]).unwrap())
        .unwrap();

    let mut engine = data.engine();
    engine.setup(names(&["A", "B", "C"])).unwrap();
    assert!(!engine
        .restore_path(cursor.load().unwrap().unwrap())
        .unwrap());
    assert!(engine.state().current_path.is_root());
}

// =============================================================================
// Data lock
// =============================================================================

#[test]
fn second_lock_fails_fast() {
    let data = DataDir::new();
    let first = DataLock::acquire(&data.paths).expect("first lock");
    assert!(first.is_held());

    match DataLock::acquire(&data.paths) {
        Err(LockError::AlreadyLocked) => {}
        other => panic!("expected AlreadyLocked, got {:?}", other.map(|_| ())),
    }

    drop(first);
    DataLock::acquire(&data.paths).expect("lock after release");
}
