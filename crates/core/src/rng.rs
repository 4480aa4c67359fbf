//! RNG module - 7-bag random piece generation
//!
//! Implements the "7-bag" randomizer. The pending queue is topped up with a
//! freshly shuffled permutation of all seven kinds whenever it holds seven or
//! fewer entries, so the preview always has at least six pieces to show and at
//! most one refill boundary is ever queued.
//!
//! Also provides a simple LCG so that a seed fully determines a game.

use arrayvec::ArrayVec;

use crate::tetromino::Tetromino;
use crate::types::{PieceKind, NEXT_PREVIEW};

/// Refill threshold and permutation length
const BAG_SIZE: usize = 7;

/// Largest queue length: a refill at the threshold adds one full bag
const BAG_CAPACITY: usize = BAG_SIZE * 2;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct Bag {
    /// Upcoming piece kinds, head first
    pending: ArrayVec<PieceKind, BAG_CAPACITY>,
    /// RNG for shuffling
    rng: SimpleRng,
}

impl Bag {
    /// Create a bag with its first permutation already queued
    pub fn new(seed: u32) -> Self {
        let mut bag = Self {
            pending: ArrayVec::new(),
            rng: SimpleRng::new(seed),
        };
        bag.fill();
        bag
    }

    /// Append a shuffled permutation if seven or fewer pieces are pending
    pub fn fill(&mut self) {
        if self.pending.len() > BAG_SIZE {
            return;
        }
        let mut next = PieceKind::ALL;
        self.rng.shuffle(&mut next);
        self.pending.extend(next);
    }

    /// Draw the next piece kind
    pub fn draw(&mut self) -> PieceKind {
        self.fill();
        // fill() leaves at least BAG_SIZE entries queued
        self.pending.remove(0)
    }

    /// Draw the next piece at its spawn position
    pub fn next_piece(&mut self) -> Tetromino {
        Tetromino::new(self.draw())
    }

    /// Peek at the upcoming pieces shown in the preview
    ///
    /// This is stack-only and does not allocate.
    pub fn peek_next(&self) -> [PieceKind; NEXT_PREVIEW] {
        let mut out = [PieceKind::I; NEXT_PREVIEW];
        for (slot, kind) in out.iter_mut().zip(self.pending.iter()) {
            *slot = *kind;
        }
        out
    }

    /// All queued kinds, head first
    pub fn pending(&self) -> &[PieceKind] {
        &self.pending
    }

    /// Get the current RNG state (for restarting game with a fresh sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for Bag {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_remapped() {
        let mut zero = SimpleRng::new(0);
        let mut one = SimpleRng::new(1);
        assert_eq!(zero.next_u32(), one.next_u32());
    }

    #[test]
    fn test_shuffle_keeps_every_element() {
        let mut rng = SimpleRng::new(99);
        let mut kinds = PieceKind::ALL;
        rng.shuffle(&mut kinds);
        for kind in PieceKind::ALL {
            assert!(kinds.contains(&kind));
        }
    }

    #[test]
    fn test_new_bag_holds_one_permutation() {
        let bag = Bag::new(1);
        assert_eq!(bag.pending().len(), 7);
    }

    #[test]
    fn test_refill_happens_eagerly_at_seven() {
        let mut bag = Bag::new(1);
        // 7 queued -> refill to 14 -> draw leaves 13.
        bag.draw();
        assert_eq!(bag.pending().len(), 13);

        // Drain down to 8 queued; no refill yet.
        for _ in 0..5 {
            bag.draw();
        }
        assert_eq!(bag.pending().len(), 8);

        // 8 queued -> no refill -> 7 left.
        bag.draw();
        assert_eq!(bag.pending().len(), 7);

        // 7 queued -> refill -> 13 left.
        bag.draw();
        assert_eq!(bag.pending().len(), 13);
    }

    #[test]
    fn test_peek_matches_draw_order() {
        let mut bag = Bag::new(42);
        for _ in 0..20 {
            let preview = bag.peek_next();
            assert_eq!(bag.draw(), preview[0]);
            assert!(bag.pending().len() >= NEXT_PREVIEW);
        }
    }

    #[test]
    fn test_next_piece_spawns_drawn_kind() {
        let mut bag = Bag::new(7);
        let expected = bag.peek_next()[0];
        let piece = bag.next_piece();
        assert_eq!(piece.kind, expected);
        assert_eq!(piece, Tetromino::new(expected));
    }
}
