//! Board module - the 10x20 grid of locked cells
//!
//! Uses a flat, row-major array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right) and y ranges 0..19
//! (top to bottom). Cell values are `0` (empty) or a colour id `1..=7`.

use arrayvec::ArrayVec;

use crate::error::BoardError;
use crate::pieces::Shape;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH, EMPTY, MAX_CELL};

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Total number of cells on the board
const BOARD_SIZE: usize = WIDTH * HEIGHT;

/// Row-major 2D view of the board, as handed to presenters.
pub type BoardGrid = [[Cell; WIDTH]; HEIGHT];

/// Indices of rows removed by one clear, bottom-most first.
pub type ClearedRows = ArrayVec<usize, HEIGHT>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [EMPTY; BOARD_SIZE],
        }
    }

    /// Build a board from a row-major grid.
    ///
    /// Fails on the first cell outside `0..=7`.
    pub fn from_grid(grid: &BoardGrid) -> Result<Self, BoardError> {
        let mut board = Self::new();
        for (y, row) in grid.iter().enumerate() {
            if let Some(x) = row.iter().position(|&c| c > MAX_CELL) {
                return Err(BoardError::InvalidCell { x, y, value: row[x] });
            }
            board.cells[y * WIDTH..(y + 1) * WIDTH].copy_from_slice(row);
        }
        Ok(board)
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y); None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y); returns false if out of bounds or if
    /// `cell` is not a colour id in `0..=7`
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        if cell > MAX_CELL {
            return false;
        }
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(c) if c != EMPTY)
    }

    /// Whether a block placed at (x, y) would collide.
    ///
    /// Columns outside 0..10 and rows at or below 20 always collide. Rows
    /// above the top (y < 0) never do: pieces spawn partly above the visible
    /// board.
    pub fn blocks(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return true;
        }
        if y < 0 {
            return false;
        }
        self.is_occupied(x, y)
    }

    /// Whether `shape` anchored with its top-left corner at (x, y) collides
    pub fn collides(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape
            .filled()
            .any(|(dx, dy, _)| self.blocks(x + dx, y + dy))
    }

    /// Write every non-zero cell of `shape` at anchor (x, y).
    ///
    /// Cells above the top edge are dropped. Returns how many cells were
    /// written.
    pub fn lock_shape(&mut self, shape: &Shape, x: i8, y: i8) -> usize {
        let mut written = 0;
        for (dx, dy, v) in shape.filled() {
            if self.set(x + dx, y + dy, v) {
                written += 1;
            }
        }
        written
    }

    /// Row `y` as a slice
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Number of filled cells in row `y`
    pub fn row_fill_count(&self, y: usize) -> usize {
        if y >= HEIGHT {
            return 0;
        }
        self.row(y).iter().filter(|&&c| c != EMPTY).count()
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        y < HEIGHT && self.row_fill_count(y) == WIDTH
    }

    /// Total filled cells on the board
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != EMPTY).count()
    }

    /// Remove every full row, shifting the rows above down.
    ///
    /// Scans from the bottom and stops at the first completely empty row.
    /// Pieces only lock on top of the stack, so a board built by play has no
    /// non-empty row above an empty one and the scan sees every full row. A
    /// hand-built board with a full row floating above an empty row keeps
    /// that row. Remaining rows keep their relative order and the vacated rows at the
    /// top are emptied. Returns the cleared row indices, bottom-most first.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();

        for y in (0..HEIGHT).rev() {
            match self.row_fill_count(y) {
                0 => break,
                WIDTH => cleared.push(y),
                _ => {}
            }
        }

        if cleared.is_empty() {
            return cleared;
        }

        // Two-pointer compaction from the bottom up.
        let mut write_y = HEIGHT;
        for read_y in (0..HEIGHT).rev() {
            if cleared.contains(&read_y) {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                self.cells
                    .copy_within(read_y * WIDTH..(read_y + 1) * WIDTH, write_y * WIDTH);
            }
        }

        self.cells[..write_y * WIDTH].fill(EMPTY);

        cleared
    }

    /// Copy the board into a row-major grid
    pub fn write_grid(&self, out: &mut BoardGrid) {
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(self.row(y));
        }
    }

    pub fn to_grid(&self) -> BoardGrid {
        let mut grid = [[EMPTY; WIDTH]; HEIGHT];
        self.write_grid(&mut grid);
        grid
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
