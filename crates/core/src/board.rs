//! Board module - manages the game grid
//!
//! The board is a 10x40 grid where each cell is empty or tagged with the kind
//! of the piece that filled it. Rows 0-19 are the hidden buffer above the
//! 20 visible rows. Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..39 (top to bottom).

use arrayvec::ArrayVec;

use crate::tetromino::Tetromino;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, HIDDEN_ROWS};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices removed by a single clear, bottom to top
pub type ClearedRows = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// The game board - 10 columns x 40 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Borrow a single row, None if out of range
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= BOARD_HEIGHT as usize {
            return None;
        }
        let start = y * BOARD_WIDTH as usize;
        Some(&self.cells[start..start + BOARD_WIDTH as usize])
    }

    /// Would `piece`, offset by (dx, dy), hit a wall, the floor or a filled cell?
    ///
    /// Cells above row 0 never collide so pieces may sit partly above the buffer.
    pub fn collides(&self, piece: &Tetromino, dx: i8, dy: i8) -> bool {
        piece.cells().any(|(x, y)| {
            let x = x + dx;
            let y = y + dy;
            x < 0
                || x >= BOARD_WIDTH as i8
                || y >= BOARD_HEIGHT as i8
                || (y >= 0 && self.is_occupied(x, y))
        })
    }

    /// Write the piece's kind into every cell it covers.
    ///
    /// The caller guarantees a non-colliding position; cells above the
    /// buffer are dropped.
    pub fn add_piece(&mut self, piece: &Tetromino) {
        for (x, y) in piece.cells() {
            self.set(x, y, Some(piece.kind));
        }
    }

    /// Remove every full row and return how many were removed
    pub fn clear_lines(&mut self) -> usize {
        self.clear_full_rows().len()
    }

    /// Clear all full rows and return the row indices that were cleared (sorted bottom to top)
    ///
    /// Full rows are detected in a single bottom-up pass; surviving rows are
    /// compacted downward in order and the freed rows at the top are emptied.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared_rows
    }

    /// Fill a whole row with `kind`, leaving the listed columns empty
    pub fn fill_row(&mut self, y: usize, kind: PieceKind, holes: &[usize]) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        for (x, cell) in self.cells[start..start + BOARD_WIDTH as usize]
            .iter_mut()
            .enumerate()
        {
            *cell = if holes.contains(&x) { None } else { Some(kind) };
        }
        true
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Rows of the visible window (buffer rows excluded), top to bottom
    pub fn visible_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells
            .chunks_exact(BOARD_WIDTH as usize)
            .skip(HIDDEN_ROWS as usize)
    }

    /// Copy the grid into a fixed 2D array (snapshot export)
    pub fn write_grid(&self, out: &mut [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (dst, src) in out
            .iter_mut()
            .zip(self.cells.chunks_exact(BOARD_WIDTH as usize))
        {
            dst.copy_from_slice(src);
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 39), Some(399));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 40), None);
    }

    #[test]
    fn test_collides_ignores_rows_above_buffer() {
        let board = Board::new();
        let mut piece = Tetromino::new(PieceKind::O);
        piece.y = -1;
        assert!(!board.collides(&piece, 0, 0));
        assert!(!board.collides(&piece, 0, -5));
    }

    #[test]
    fn test_collides_with_walls_floor_and_stack() {
        let mut board = Board::new();
        let mut piece = Tetromino::new(PieceKind::O);
        piece.x = 0;
        piece.y = 38;

        assert!(!board.collides(&piece, 0, 0));
        assert!(board.collides(&piece, -1, 0));
        assert!(board.collides(&piece, 0, 1));

        piece.x = 8;
        assert!(board.collides(&piece, 1, 0));

        board.set(8, 39, Some(PieceKind::T));
        assert!(board.collides(&piece, 0, 0));
    }

    #[test]
    fn test_add_piece_tags_cells_with_kind() {
        let mut board = Board::new();
        let piece = Tetromino::new(PieceKind::T);
        board.add_piece(&piece);

        let filled: Vec<_> = piece.cells().collect();
        assert_eq!(filled.len(), 4);
        for (x, y) in filled {
            assert_eq!(board.get(x, y), Some(Some(PieceKind::T)));
        }
    }

    #[test]
    fn test_clear_full_rows_compacts_non_adjacent_rows() {
        let mut board = Board::new();
        board.fill_row(37, PieceKind::I, &[]);
        board.fill_row(38, PieceKind::J, &[4]);
        board.fill_row(39, PieceKind::L, &[]);

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[39, 37]);

        // The partial row drops to the bottom, keeping its hole.
        assert_eq!(board.get(0, 39), Some(Some(PieceKind::J)));
        assert_eq!(board.get(4, 39), Some(None));
        assert!(board.row(38).unwrap().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_clear_more_than_four_rows_from_prepared_board() {
        let mut board = Board::new();
        for y in 30..40 {
            board.fill_row(y, PieceKind::S, &[]);
        }
        assert_eq!(board.clear_lines(), 10);
        assert!(board.cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_write_grid_matches_cells() {
        let mut board = Board::new();
        board.set(3, 25, Some(PieceKind::Z));
        let mut grid = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        board.write_grid(&mut grid);
        assert_eq!(grid[25][3], Some(PieceKind::Z));
        assert_eq!(board.visible_rows().count(), 20);
    }
}
