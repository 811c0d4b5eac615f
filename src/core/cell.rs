//! Cell addressing for the board grid.
//!
//! Every board position is identified by a `Cell` holding zero-based
//! row and column indices. Cells order row-major: all of row 0 before
//! row 1, and within a row by column. Deterministic tie-breaking
//! (e.g. picking the first known-safe cell) relies on this ordering.
//!
//! ## Usage
//!
//! ```
//! use sweeper_ai::Cell;
//!
//! let a = Cell::new(0, 3);
//! let b = Cell::new(1, 0);
//!
//! // Row-major: everything in row 0 precedes row 1
//! assert!(a < b);
//!
//! // Tuple conversion for terse construction
//! let c: Cell = (2, 5).into();
//! assert_eq!(c.row, 2);
//! assert_eq!(c.col, 5);
//! ```

use serde::{Deserialize, Serialize};

/// A board position: zero-based row and column.
///
/// Ordering is row-major, which makes `Ord`-based selection (minimum
/// of a set of cells) deterministic and reading-order intuitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Zero-based row index.
    pub row: usize,
    /// Zero-based column index.
    pub col: usize,
}

impl Cell {
    /// Create a cell at the given row and column.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Decompose into a `(row, col)` pair.
    #[must_use]
    pub const fn coords(self) -> (usize, usize) {
        (self.row, self.col)
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_row_major() {
        let cells = [
            Cell::new(1, 0),
            Cell::new(0, 2),
            Cell::new(0, 0),
            Cell::new(1, 2),
            Cell::new(0, 1),
        ];

        let mut sorted = cells;
        sorted.sort();

        assert_eq!(
            sorted,
            [
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(0, 2),
                Cell::new(1, 0),
                Cell::new(1, 2),
            ]
        );
    }

    #[test]
    fn test_from_tuple() {
        let cell: Cell = (3, 7).into();
        assert_eq!(cell, Cell::new(3, 7));
        assert_eq!(cell.coords(), (3, 7));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Cell::new(4, 2)), "(4, 2)");
    }

    #[test]
    fn test_serialization() {
        let cell = Cell::new(5, 9);
        let json = serde_json::to_string(&cell).unwrap();
        let deserialized: Cell = serde_json::from_str(&json).unwrap();
        assert_eq!(cell, deserialized);
    }
}
