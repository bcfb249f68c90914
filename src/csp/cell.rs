#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use std::fmt;

/// Number of rows/columns on the board.
pub const SIZE: usize = 9;

/// Total number of cells.
pub const NUM_CELLS: usize = SIZE * SIZE;

/// A cell index in row-major order (0..81).
///
/// Row-major order doubles as the deterministic tie-break order for the
/// variable-selection heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Cell(u8);

impl Cell {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        debug_assert!(row < SIZE && col < SIZE);
        Self((row * SIZE + col) as u8)
    }

    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        debug_assert!(index < NUM_CELLS);
        Self(index as u8)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn row(self) -> usize {
        self.0 as usize / SIZE
    }

    #[must_use]
    pub const fn col(self) -> usize {
        self.0 as usize % SIZE
    }

    /// The 3x3 box this cell belongs to: `(row/3)*3 + col/3`.
    #[must_use]
    pub const fn box_index(self) -> usize {
        (self.row() / 3) * 3 + self.col() / 3
    }

    /// Whether two distinct cells constrain each other.
    #[must_use]
    pub const fn is_peer_of(self, other: Self) -> bool {
        self.0 != other.0
            && (self.row() == other.row()
                || self.col() == other.col()
                || self.box_index() == other.box_index())
    }

    /// All cells in row-major order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..NUM_CELLS).map(Self::from_index)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", self.row(), self.col())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_col_roundtrip() {
        for cell in Cell::all() {
            assert_eq!(Cell::new(cell.row(), cell.col()), cell);
        }
    }

    #[test]
    fn test_box_index() {
        assert_eq!(Cell::new(0, 0).box_index(), 0);
        assert_eq!(Cell::new(0, 8).box_index(), 2);
        assert_eq!(Cell::new(4, 4).box_index(), 4);
        assert_eq!(Cell::new(8, 0).box_index(), 6);
        assert_eq!(Cell::new(8, 8).box_index(), 8);
    }

    #[test]
    fn test_peer_relation() {
        let c = Cell::new(4, 4);
        assert!(c.is_peer_of(Cell::new(4, 0)));
        assert!(c.is_peer_of(Cell::new(0, 4)));
        assert!(c.is_peer_of(Cell::new(3, 3)));
        assert!(!c.is_peer_of(Cell::new(0, 0)));
        assert!(!c.is_peer_of(c));
    }

    #[test]
    fn test_each_cell_has_twenty_peers() {
        for cell in Cell::all() {
            let count = Cell::all().filter(|&o| cell.is_peer_of(o)).count();
            assert_eq!(count, 20);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Cell::new(2, 7).to_string(), "r2c7");
    }
}
