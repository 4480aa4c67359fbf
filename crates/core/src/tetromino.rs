//! Tetromino module - shape catalog and the live piece
//!
//! Shapes are small square boolean matrices (2x2, 3x3 or 4x4) stored inline in
//! a fixed 4x4 array so that pieces are `Copy`. Rotation builds a fresh matrix
//! by transposing the old one; there is no wall-kick table, so a rotation that
//! collides must be reverted by the caller.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::types::{PieceKind, RotateDirection, Rotation, BOARD_WIDTH};

/// Largest bounding box of any piece
pub const MAX_SHAPE_SIZE: usize = 4;

/// Row the I piece spawns in (its filled row lands on row 20)
const SPAWN_ROW_I: i8 = 19;

/// Row every other piece spawns in
const SPAWN_ROW: i8 = 20;

/// Square occupancy matrix of a piece, indexed `[y][x]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Shape {
    size: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    fn from_rows<const N: usize>(rows: [[u8; N]; N]) -> Self {
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                cells[y][x] = v != 0;
            }
        }
        Self {
            size: N as u8,
            cells,
        }
    }

    /// Spawn orientation of a piece kind
    pub fn of(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => Self::from_rows([
                [0, 0, 0, 0],
                [1, 1, 1, 1],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
            ]),
            PieceKind::O => Self::from_rows([[1, 1], [1, 1]]),
            PieceKind::T => Self::from_rows([[0, 1, 0], [1, 1, 1], [0, 0, 0]]),
            PieceKind::S => Self::from_rows([[0, 1, 1], [1, 1, 0], [0, 0, 0]]),
            PieceKind::Z => Self::from_rows([[1, 1, 0], [0, 1, 1], [0, 0, 0]]),
            PieceKind::J => Self::from_rows([[1, 0, 0], [1, 1, 1], [0, 0, 0]]),
            PieceKind::L => Self::from_rows([[0, 0, 1], [1, 1, 1], [0, 0, 0]]),
        }
    }

    /// Side length of the bounding box
    pub fn size(&self) -> usize {
        self.size as usize
    }

    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.size() && y < self.size() && self.cells[y][x]
    }

    /// Local (x, y) offsets of the filled cells, row-major
    pub fn occupied(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let n = self.size();
        (0..n).flat_map(move |y| {
            (0..n)
                .filter(move |&x| self.cells[y][x])
                .map(move |x| (x as i8, y as i8))
        })
    }

    /// A new matrix rotated 90° in `direction`
    ///
    /// Clockwise moves `[y][x]` to `[x][n-1-y]`; counter-clockwise moves it to `[n-1-x][y]`.
    pub fn rotated(&self, direction: RotateDirection) -> Self {
        let n = self.size();
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for y in 0..n {
            for x in 0..n {
                match direction {
                    RotateDirection::Clockwise => cells[x][n - 1 - y] = self.cells[y][x],
                    RotateDirection::CounterClockwise => cells[n - 1 - x][y] = self.cells[y][x],
                }
            }
        }
        Self {
            size: self.size,
            cells,
        }
    }
}

/// Active falling piece
///
/// `(x, y)` is the top-left corner of the shape's bounding box in board coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tetromino {
    pub kind: PieceKind,
    pub shape: Shape,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at its spawn position and orientation
    pub fn new(kind: PieceKind) -> Self {
        let shape = Shape::of(kind);
        let (x, y) = Self::spawn_position(kind, shape.size());
        Self {
            kind,
            shape,
            rotation: Rotation::North,
            x,
            y,
        }
    }

    /// Horizontally centred; 3-wide pieces lean one column left
    fn spawn_position(kind: PieceKind, size: usize) -> (i8, i8) {
        let centred = ((BOARD_WIDTH as usize - size) / 2) as i8;
        match kind {
            PieceKind::I => (centred, SPAWN_ROW_I),
            PieceKind::O => (centred, SPAWN_ROW),
            _ => (centred - 1, SPAWN_ROW),
        }
    }

    /// Absolute board coordinates of the filled cells
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .occupied()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Rotate the shape in place
    pub fn rotate(&mut self, direction: RotateDirection) {
        self.shape = self.shape.rotated(direction);
        self.rotation = match direction {
            RotateDirection::Clockwise => self.rotation.rotate_cw(),
            RotateDirection::CounterClockwise => self.rotation.rotate_ccw(),
        };
    }

    /// Would this piece collide if offset by (dx, dy)?
    pub fn check_collision(&self, board: &Board, dx: i8, dy: i8) -> bool {
        board.collides(self, dx, dy)
    }

    /// Deepest row this piece can fall to from its current position
    pub fn ghost_y(&self, board: &Board) -> i8 {
        let mut drop: i8 = 0;
        while !self.check_collision(board, 0, drop + 1) {
            drop += 1;
        }
        self.y + drop
    }
}
