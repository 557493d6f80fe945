//! core
//!
//! Core domain types, the state machine, and its supporting pieces.
//!
//! # Modules
//!
//! - [`types`] - Strong types: DomainName, DomainPath, Document
//! - [`codec`] - PathKey encoding of paths
//! - [`tree`] - The domain taxonomy
//! - [`documents`] - Documents attached to paths
//! - [`state`] - AppState, Action, and the transition function
//! - [`navigation`] - Current-path arithmetic and derived views
//! - [`verify`] - Read-only orphan and depth checks
//! - [`config`] - Configuration schema and loading
//! - [`paths`] - Centralized path routing for storage
//! - [`lock`] - Exclusive lock on the data directory
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Transitions are pure: a snapshot is never mutated in place
//! - Schemas are strict and self-describing

pub mod codec;
pub mod config;
pub mod documents;
pub mod lock;
pub mod navigation;
pub mod paths;
pub mod state;
pub mod tree;
pub mod types;
pub mod verify;
