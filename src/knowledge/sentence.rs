//! Logical sentences about groups of board cells.
//!
//! A `Sentence` is the unit of knowledge in the inference engine: a
//! set of cells together with a count, read as "exactly `count` of
//! these cells are mines". Sentences only ever mention cells whose
//! status is still undetermined; as cells are resolved they are
//! removed and the count adjusted, so the sentence stays true.
//!
//! ## Conclusions
//!
//! Two shapes of sentence give away their cells outright:
//!
//! - `count == cells.len()` (and the set is non-empty): every cell is
//!   a mine
//! - `count == 0`: every cell is safe
//!
//! Anything in between says nothing certain about individual cells.
//!
//! ## Subset resolution
//!
//! When one sentence's cells are a subset of another's, subtracting
//! the smaller from the larger yields a new true sentence over the
//! leftover cells. This is the engine's only inference rule beyond
//! direct conclusions, and it is what lets separate observations
//! combine:
//!
//! ```
//! use sweeper_ai::{Cell, Sentence};
//!
//! let a = Sentence::new([Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2)], 2);
//! let b = Sentence::new([Cell::new(0, 0), Cell::new(0, 1)], 1);
//!
//! let derived = a.resolve_with(&b).unwrap();
//! assert_eq!(derived, Sentence::new([Cell::new(0, 2)], 1));
//!
//! // The leftover cell is now known to be a mine
//! assert!(derived.known_mines().contains(&Cell::new(0, 2)));
//! ```

use im::OrdSet;
use serde::{Deserialize, Serialize};

use crate::core::Cell;

/// A constraint asserting that exactly `count` of `cells` are mines.
///
/// Cell sets are persistent (`im::OrdSet`), so cloning a sentence and
/// deriving new ones from it shares structure instead of copying.
/// Equality compares cells and count, which the engine relies on to
/// deduplicate derived sentences.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    cells: OrdSet<Cell>,
    count: usize,
}

impl Sentence {
    /// Create a sentence over the given cells.
    ///
    /// Duplicate cells collapse; `count` then applies to the resulting
    /// set. Callers are expected to pass a count no larger than the
    /// number of distinct cells, since no board can satisfy more.
    #[must_use]
    pub fn new(cells: impl IntoIterator<Item = Cell>, count: usize) -> Self {
        Self {
            cells: cells.into_iter().collect(),
            count,
        }
    }

    /// The undetermined cells this sentence constrains.
    #[must_use]
    pub fn cells(&self) -> &OrdSet<Cell> {
        &self.cells
    }

    /// How many of the cells are mines.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Number of cells in the sentence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the sentence constrains no cells at all.
    ///
    /// Empty sentences are vacuous and carry no information; the
    /// engine discards them during compaction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether this sentence mentions `cell`.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// The cells this sentence proves to be mines.
    ///
    /// Non-empty exactly when every cell must be a mine, i.e. the
    /// count equals the number of cells and there is at least one
    /// cell. The emptiness guard keeps the vacuous `{} = 0` sentence
    /// from claiming anything.
    ///
    /// ```
    /// use sweeper_ai::{Cell, Sentence};
    ///
    /// let all_mines = Sentence::new([Cell::new(1, 0), Cell::new(1, 1)], 2);
    /// assert_eq!(all_mines.known_mines().len(), 2);
    ///
    /// let undecided = Sentence::new([Cell::new(1, 0), Cell::new(1, 1)], 1);
    /// assert!(undecided.known_mines().is_empty());
    /// ```
    #[must_use]
    pub fn known_mines(&self) -> OrdSet<Cell> {
        if !self.cells.is_empty() && self.count == self.cells.len() {
            self.cells.clone()
        } else {
            OrdSet::new()
        }
    }

    /// The cells this sentence proves to be safe.
    ///
    /// Non-empty exactly when the count is zero: none of the cells
    /// can be a mine.
    #[must_use]
    pub fn known_safes(&self) -> OrdSet<Cell> {
        if self.count == 0 {
            self.cells.clone()
        } else {
            OrdSet::new()
        }
    }

    /// Record that `cell` is a mine.
    ///
    /// If the sentence mentions the cell, it is removed and the count
    /// drops by one, leaving a true constraint on the remaining cells.
    /// Sentences that do not mention the cell are untouched, which
    /// makes repeated marking harmless.
    pub fn mark_mine(&mut self, cell: Cell) {
        if self.cells.remove(&cell).is_some() {
            self.count -= 1;
        }
    }

    /// Record that `cell` is safe.
    ///
    /// If the sentence mentions the cell, it is removed; the count is
    /// unchanged because a safe cell never contributed to it.
    pub fn mark_safe(&mut self, cell: Cell) {
        self.cells.remove(&cell);
    }

    /// Derive the subset-resolution consequence of this sentence and
    /// a sentence over a subset of its cells.
    ///
    /// If `subset.cells ⊆ self.cells`, the cells in `self` but not in
    /// `subset` contain exactly `self.count - subset.count` mines.
    /// Returns `None` when `subset` is not contained in `self` or when
    /// the difference would be empty (identical cell sets derive
    /// nothing new).
    ///
    /// The counts are trusted: feeding sentences where the subset
    /// claims more mines than the superset (impossible if both are
    /// true of one board) underflows in debug builds.
    #[must_use]
    pub fn resolve_with(&self, subset: &Sentence) -> Option<Sentence> {
        if !subset.cells.is_subset(&self.cells) {
            return None;
        }

        let difference = self.cells.clone().relative_complement(subset.cells.clone());
        if difference.is_empty() {
            return None;
        }

        Some(Sentence {
            cells: difference,
            count: self.count - subset.count,
        })
    }
}

impl std::fmt::Display for Sentence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", cell)?;
        }
        write!(f, "}} = {}", self.count)
    }
}
