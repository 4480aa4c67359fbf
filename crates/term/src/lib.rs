//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It renders
//! snapshots into a plain framebuffer that is flushed to the terminal as a
//! diff against the previous frame.
//!
//! - [`fb`]: styled character framebuffer
//! - [`game_view`]: snapshot to framebuffer, no I/O
//! - [`renderer`]: raw mode, alternate screen and diff flushing
//! - [`sink`]: the [`core::RenderSink`] implementation used by the binary

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod sink;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_color, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use sink::TerminalSink;
