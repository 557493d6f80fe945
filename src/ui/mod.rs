//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`prompts`] - Confirmations for destructive commands
//! - [`output`] - Output formatting and display
//!
//! All user-facing output and prompts go through this module. Diagnostics
//! go through `tracing` instead (see [`crate::logging`]).

pub mod output;
pub mod prompts;
