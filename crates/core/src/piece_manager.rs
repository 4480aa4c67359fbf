//! Piece manager - current, held and ghost pieces
//!
//! Owns the bag and the single live piece. The ghost is a derived copy of the
//! live piece moved down to its landing row; it must be refreshed after every
//! change to the live piece or the board.

use crate::board::Board;
use crate::rng::Bag;
use crate::tetromino::Tetromino;
use crate::types::{PieceKind, NEXT_PREVIEW};

#[derive(Debug, Clone)]
pub struct PieceManager {
    bag: Bag,
    current: Tetromino,
    hold: Option<PieceKind>,
    ghost: Tetromino,
    can_hold: bool,
}

impl PieceManager {
    /// Draw the first piece from a bag seeded with `seed`
    pub fn new(seed: u32, board: &Board) -> Self {
        let mut bag = Bag::new(seed);
        let current = bag.next_piece();
        let mut manager = Self {
            bag,
            current,
            hold: None,
            ghost: current,
            can_hold: true,
        };
        manager.update_ghost_piece(board);
        manager
    }

    /// Draw a fresh piece from the bag
    pub fn get_next_piece(&mut self) -> Tetromino {
        self.bag.next_piece()
    }

    /// Replace the live piece with the next one from the bag
    pub fn spawn_next(&mut self) {
        self.current = self.get_next_piece();
    }

    /// Recompute the ghost from the live piece's shape and column
    pub fn update_ghost_piece(&mut self, board: &Board) {
        let mut ghost = self.current;
        ghost.y = self.current.ghost_y(board);
        self.ghost = ghost;
    }

    /// Swap the live piece into the hold slot.
    ///
    /// Returns false if a hold was already used since the last lock. The piece
    /// coming out of hold always spawns fresh.
    pub fn hold_current_piece(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }

        let current_kind = self.current.kind;
        self.current = match self.hold.replace(current_kind) {
            Some(held) => Tetromino::new(held),
            None => self.get_next_piece(),
        };
        self.can_hold = false;
        true
    }

    pub fn reset_hold_ability(&mut self) {
        self.can_hold = true;
    }

    pub fn current(&self) -> &Tetromino {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut Tetromino {
        &mut self.current
    }

    pub fn ghost(&self) -> &Tetromino {
        &self.ghost
    }

    pub fn hold(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn preview(&self) -> [PieceKind; NEXT_PREVIEW] {
        self.bag.peek_next()
    }

    pub fn seed(&self) -> u32 {
        self.bag.seed()
    }
}
