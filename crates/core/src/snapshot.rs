//! Read-only view of the game handed to renderers after each tick.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::tetromino::{Shape, Tetromino};
use crate::types::{Cell, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH, HIDDEN_ROWS, NEXT_PREVIEW};

/// Where the controller's state machine currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GamePhase {
    /// Piece is falling under gravity
    Falling,
    /// Piece is resting and will lock when the delay runs out
    LockDelayArmed,
    Paused,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl PieceSnapshot {
    /// Absolute board coordinates of the filled cells
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .occupied()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

impl From<&Tetromino> for PieceSnapshot {
    fn from(value: &Tetromino) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub current: PieceSnapshot,
    pub ghost: PieceSnapshot,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub next_queue: [PieceKind; NEXT_PREVIEW],
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
    /// Time left before the resting piece locks, if the delay is armed
    pub lock_delay_ms: Option<u32>,
    pub phase: GamePhase,
    pub paused: bool,
    pub game_over: bool,
    pub episode: u32,
    pub seed: u32,
}

impl GameSnapshot {
    /// Rows of the visible window, top to bottom
    pub fn visible_rows(&self) -> &[[Cell; BOARD_WIDTH as usize]] {
        &self.board[HIDDEN_ROWS as usize..]
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let piece = PieceSnapshot::from(&Tetromino::new(PieceKind::I));
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            current: piece,
            ghost: piece,
            hold: None,
            can_hold: true,
            next_queue: [PieceKind::I; NEXT_PREVIEW],
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: 0,
            lock_delay_ms: None,
            phase: GamePhase::Falling,
            paused: false,
            game_over: false,
            episode: 0,
            seed: 0,
        }
    }
}

/// Presentation sink fed one snapshot per frame.
///
/// The engine never talks to a UI directly; frontends implement this.
pub trait RenderSink {
    fn render(&mut self, snapshot: &GameSnapshot);
}

impl<F: FnMut(&GameSnapshot)> RenderSink for F {
    fn render(&mut self, snapshot: &GameSnapshot) {
        self(snapshot)
    }
}
