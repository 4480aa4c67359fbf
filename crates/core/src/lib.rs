//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and timing.
//! It has **zero dependencies** on UI, terminal, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical piece sequences
//! - **Testable**: Every rule is covered by unit tests
//! - **Portable**: Any frontend can drive it through [`RenderSink`]
//!
//! # Module Structure
//!
//! - [`board`]: 10x40 grid with collision detection and batch line clearing
//! - [`tetromino`]: shape catalog, matrix rotation, ghost projection
//! - [`rng`]: 7-bag randomizer with eager refill
//! - [`piece_manager`]: current, held and ghost pieces
//! - [`lock_delay`]: cancellable single-shot lock timer
//! - [`scoring`]: line clear points, drop points and level speeds
//! - [`game_controller`]: the state machine driven by `tick`
//! - [`snapshot`]: read-only frame state and the render sink trait
//! - [`config`]: environment-driven settings
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: each run of seven draws is a permutation of all pieces
//! - **Naive Rotation**: 90° matrix rotation, reverted if it collides (no wall kicks)
//! - **Lock Delay**: 500ms once a piece cannot fall; any move, rotation or hold resets it
//! - **Ghost Piece**: shows where the current piece will land
//! - **Hold**: store one piece kind, once per lock
//! - **Scoring**: 100/300/500/800 × level, +1 per soft drop row, +2 per hard drop row
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameController;
//! use blockfall_types::GameAction;
//!
//! let mut game = GameController::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! Call [`GameController::tick`] every frame with a monotonic timestamp in
//! milliseconds. Gravity moves the piece one row once more than the level's
//! drop interval has elapsed; paused time is never counted.

pub mod board;
pub mod config;
pub mod game_controller;
pub mod lock_delay;
pub mod piece_manager;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod tetromino;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::GameConfig;
pub use game_controller::{GameController, LockEvent};
pub use lock_delay::LockDelay;
pub use piece_manager::PieceManager;
pub use rng::{Bag, SimpleRng};
pub use snapshot::{GamePhase, GameSnapshot, PieceSnapshot, RenderSink};
pub use tetromino::{Shape, Tetromino};
