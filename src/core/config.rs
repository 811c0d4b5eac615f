//! Board configuration.
//!
//! A `BoardConfig` fixes the grid dimensions and answers the geometry
//! questions everything else depends on: bounds checks, cell
//! enumeration, and the 8-cell neighborhood clipped at the edges.
//!
//! The config is a small `Copy` value. Agents, boards, and sessions
//! each hold their own copy rather than borrowing a shared one.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::Cell;

/// Grid dimensions for a board and the agents reasoning about it.
///
/// ```
/// use sweeper_ai::{BoardConfig, Cell};
///
/// let config = BoardConfig::new(8, 8);
/// assert_eq!(config.area(), 64);
///
/// // Corner cells have only 3 in-bounds neighbors
/// assert_eq!(config.neighbors(Cell::new(0, 0)).len(), 3);
///
/// // Interior cells have the full 8
/// assert_eq!(config.neighbors(Cell::new(4, 4)).len(), 8);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardConfig {
    height: usize,
    width: usize,
}

impl Default for BoardConfig {
    /// The classic 8x8 beginner grid.
    fn default() -> Self {
        Self::new(8, 8)
    }
}

impl BoardConfig {
    /// Create a configuration for a `height` x `width` grid.
    #[must_use]
    pub fn new(height: usize, width: usize) -> Self {
        assert!(height > 0, "Board height must be positive");
        assert!(width > 0, "Board width must be positive");

        Self { height, width }
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(self) -> usize {
        self.height
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(self) -> usize {
        self.width
    }

    /// Total number of cells on the grid.
    #[must_use]
    pub const fn area(self) -> usize {
        self.height * self.width
    }

    /// Check whether a cell lies on the grid.
    #[must_use]
    pub const fn contains(self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    /// Iterate every cell in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |col| Cell::new(row, col)))
    }

    /// The in-bounds cells adjacent to `cell`, including diagonals.
    ///
    /// Covers all eight row/column offsets in `-1..=1` except `(0, 0)`,
    /// dropping any that fall off the grid. The cell itself is never
    /// included. Interior cells get 8 neighbors, edges 5, corners 3.
    #[must_use]
    pub fn neighbors(self, cell: Cell) -> SmallVec<[Cell; 8]> {
        let mut neighbors = SmallVec::new();

        for row_offset in -1i64..=1 {
            for col_offset in -1i64..=1 {
                if row_offset == 0 && col_offset == 0 {
                    continue;
                }

                let row = cell.row as i64 + row_offset;
                let col = cell.col as i64 + col_offset;

                if row < 0 || col < 0 {
                    continue;
                }

                let neighbor = Cell::new(row as usize, col as usize);
                if self.contains(neighbor) {
                    neighbors.push(neighbor);
                }
            }
        }

        neighbors
    }
}
