//! Blockfall (workspace facade crate).
//!
//! Re-exports the engine, input, terminal and shared-type crates under
//! `blockfall::{core,input,term,types}` and hosts the JSON-lines event log
//! used by the binary.

pub mod event_log;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
