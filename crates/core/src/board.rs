//! Board module - manages the game grid
//!
//! The board is a `width x height` grid (10x20 by default) where each cell is
//! empty or holds the kind of the piece that locked there.
//! Cells are stored in one flat row-major `Vec` sized once at construction.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//! Rows above the board (`y < 0`) are open space for collision purposes but
//! can never hold a locked cell.

use crate::error::LockError;
use crate::pieces::Shape;
use crate::rules::MAX_BOARD_DIM;
use crate::types::{Cell, PieceKind, BOARD_COLS, BOARD_ROWS};

/// The game board - flat row-major storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board with the given dimensions, each capped at
    /// [`MAX_BOARD_DIM`] so coordinates fit in `i8`
    pub fn new(width: u8, height: u8) -> Self {
        let width = width.min(MAX_BOARD_DIM);
        let height = height.min(MAX_BOARD_DIM);
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Build a board from text rows, aligned to the bottom of the board.
    ///
    /// `.` and space are empty cells, a piece letter (`I`, `J`, ... in either
    /// case) is a locked cell of that kind. Any other character is read as
    /// empty. The last string is the bottom row; rows beyond `height` or
    /// columns beyond `width` are ignored.
    ///
    /// ```
    /// use blocktris_core::Board;
    ///
    /// let board = Board::from_rows(4, 3, &["I...", "IIJ."]);
    /// assert!(board.is_occupied(0, 1));
    /// assert!(board.is_occupied(2, 2));
    /// assert!(!board.is_occupied(0, 0));
    /// ```
    pub fn from_rows(width: u8, height: u8, rows: &[&str]) -> Self {
        let mut board = Self::new(width, height);
        let skip = rows.len().saturating_sub(height as usize);
        let top = height as usize - (rows.len() - skip);

        for (i, row) in rows[skip..].iter().enumerate() {
            let y = (top + i) as i8;
            for (x, ch) in row.chars().take(width as usize).enumerate() {
                let mut buf = [0u8; 4];
                let cell = PieceKind::from_str(ch.encode_utf8(&mut buf));
                board.set(x as i8, y, cell);
            }
        }
        board
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        x < 0 || x >= self.width as i8 || y < 0 || y >= self.height as i8
    }

    /// Whether `shape` placed with its origin at `(x, y)` would hit a side
    /// wall, the floor or a locked cell.
    ///
    /// Cells above the top edge (`y < 0`) are never a collision on their own.
    pub fn would_collide(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape.cells().iter().any(|&(dx, dy)| {
            let bx = x + dx;
            let by = y + dy;
            if bx < 0 || bx >= self.width as i8 || by >= self.height as i8 {
                return true;
            }
            by >= 0 && self.is_occupied(bx, by)
        })
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }
        let width = self.width as usize;
        let start = y * width;
        self.cells[start..start + width].iter().all(|cell| cell.is_some())
    }

    /// Remove row `y`, shift every row above it down by one and empty the
    /// top row. Returns 1 if a row was removed, 0 if `y` is out of range.
    pub fn clear_row(&mut self, y: usize) -> usize {
        if y >= self.height as usize {
            return 0;
        }

        let width = self.width as usize;

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            self.cells
                .copy_within(src_start..src_start + width, row * width);
        }

        for cell in &mut self.cells[..width] {
            *cell = None;
        }

        1
    }

    /// Clear every full row and return how many were removed.
    ///
    /// Scans from the bottom up; after a clear the same index is checked again,
    /// since it now holds the row that was above it. Surviving rows keep their
    /// relative order.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = self.height as usize;

        while y > 0 {
            if self.is_row_full(y - 1) {
                cleared += self.clear_row(y - 1);
            } else {
                y -= 1;
            }
        }

        cleared
    }

    /// Write `shape` into the grid with kind `kind`, origin at `(x, y)`.
    ///
    /// Every cell is validated before any is written, so on error the board is
    /// left untouched. A cell above the top edge is reported as
    /// [`LockError::SpawnAboveTop`]; a cell outside the sides or floor, or on
    /// an occupied cell, as [`LockError::Obstructed`].
    pub fn lock(&mut self, shape: &Shape, x: i8, y: i8, kind: PieceKind) -> Result<(), LockError> {
        let cells = shape.cells();

        for &(dx, dy) in &cells {
            let px = x + dx;
            let py = y + dy;
            if py < 0 {
                return Err(LockError::SpawnAboveTop { x: px, y: py });
            }
            if !self.is_valid(px, py) {
                return Err(LockError::Obstructed { x: px, y: py });
            }
        }

        for &(dx, dy) in &cells {
            self.set(x + dx, y + dy, Some(kind));
        }

        Ok(())
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Number of locked cells on the board
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Render rows as text, one string per row, using the same alphabet as
    /// [`Board::from_rows`]. Handy for assertions and debug logs.
    pub fn to_rows(&self) -> Vec<String> {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Some(kind) => kind.as_str(),
                        None => ".",
                    })
                    .collect()
            })
            .collect()
    }

    /// Encode the grid as `u8`s: 0 = empty, `color_index + 1` = locked.
    pub fn write_u8_grid(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend(
            self.cells
                .iter()
                .map(|cell| cell.map_or(0, |kind| kind.color_index() + 1)),
        );
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_COLS, BOARD_ROWS)
    }
}
