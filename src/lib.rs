//! domaintree - A hierarchical taxonomy of knowledge domains with attached documents
//!
//! Users define at least three root domains, nest subdomains under them up to
//! a configurable depth, move around the tree, and attach text documents to
//! any domain. The whole state is saved after every change.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Owns the current snapshot: bootstrap, dispatch, save
//! - [`core`] - Domain types, path codec, tree, documents, state machine
//! - [`persistence`] - Snapshot storage abstraction
//! - [`logging`] - Diagnostics through `tracing`
//! - [`ui`] - User interaction utilities
//!
//! # Correctness Invariants
//!
//! 1. State transitions are pure: an action never fails and never mutates
//!    the previous snapshot
//! 2. Distinct paths never share a storage key
//! 3. No sibling names repeat and no document name repeats at one path
//! 4. A failed save never rolls back the in-memory state; corrupt saved data
//!    is discarded entirely, never partially applied

pub mod cli;
pub mod core;
pub mod engine;
pub mod logging;
pub mod persistence;
pub mod ui;
