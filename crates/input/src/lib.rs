//! Terminal input module (engine-facing).
//!
//! This crate is independent of any UI framework beyond `crossterm` key
//! events. It maps keys onto [`crate::types::GameAction`]; repeat handling is
//! left to the terminal since the engine applies every action immediately.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
