//! Ground-truth board: where the mines actually are.
//!
//! A `Board` is the hidden answer key for one game. It is separate
//! from the [`Agent`](crate::Agent) by construction: nothing here
//! leaks mine positions except through the queries a revealed cell
//! legitimately answers (is this a mine, and how many mines touch
//! it). The session driver mediates between the two.

use rustc_hash::FxHashSet;

use crate::core::{AgentRng, BoardConfig, Cell};
use crate::game::Minefield;

/// A minefield with known mine positions.
#[derive(Clone, Debug)]
pub struct Board {
    config: BoardConfig,
    mines: FxHashSet<Cell>,
}

impl Board {
    /// Generate a board with `mine_count` mines placed uniformly at
    /// random.
    ///
    /// Placement is by rejection sampling: draw cells until enough
    /// distinct ones accumulate. The same config, count, and RNG
    /// state always produce the same board.
    #[must_use]
    pub fn generate(config: BoardConfig, mine_count: usize, rng: &mut AgentRng) -> Self {
        assert!(
            mine_count <= config.area(),
            "Cannot place {} mines on {} cells",
            mine_count,
            config.area()
        );

        let mut mines = FxHashSet::default();
        while mines.len() < mine_count {
            let row = rng.gen_range_usize(0..config.height());
            let col = rng.gen_range_usize(0..config.width());
            mines.insert(Cell::new(row, col));
        }

        Self { config, mines }
    }

    /// Build a board with explicit mine positions.
    ///
    /// Duplicates collapse. Useful for fixtures and replays.
    #[must_use]
    pub fn from_mines(config: BoardConfig, mines: impl IntoIterator<Item = Cell>) -> Self {
        let mines: FxHashSet<Cell> = mines.into_iter().collect();
        for mine in &mines {
            assert!(config.contains(*mine), "Mine out of bounds: {}", mine);
        }

        Self { config, mines }
    }

    /// Grid dimensions.
    #[must_use]
    pub fn config(&self) -> BoardConfig {
        self.config
    }

    /// Whether `cell` holds a mine.
    #[must_use]
    pub fn is_mine(&self, cell: Cell) -> bool {
        self.mines.contains(&cell)
    }

    /// Number of mines adjacent to `cell`, not counting `cell` itself.
    ///
    /// This is the number a reveal of `cell` reports.
    #[must_use]
    pub fn neighbor_mines(&self, cell: Cell) -> usize {
        self.config
            .neighbors(cell)
            .into_iter()
            .filter(|neighbor| self.mines.contains(neighbor))
            .count()
    }

    /// Total number of mines on the board.
    #[must_use]
    pub fn mine_count(&self) -> usize {
        self.mines.len()
    }

    /// Iterate the mine positions in no particular order.
    pub fn mines(&self) -> impl Iterator<Item = Cell> + '_ {
        self.mines.iter().copied()
    }

    /// Number of cells that are not mines.
    ///
    /// Revealing every one of them clears the board.
    #[must_use]
    pub fn safe_area(&self) -> usize {
        self.config.area() - self.mines.len()
    }

    /// Whether `flagged` names exactly the mines: every mine flagged
    /// and nothing else.
    #[must_use]
    pub fn is_fully_flagged(&self, flagged: &FxHashSet<Cell>) -> bool {
        *flagged == self.mines
    }
}

impl Minefield for Board {
    fn config(&self) -> BoardConfig {
        self.config
    }

    fn is_mine(&self, cell: Cell) -> bool {
        Board::is_mine(self, cell)
    }

    fn neighbor_mines(&self, cell: Cell) -> usize {
        Board::neighbor_mines(self, cell)
    }

    fn mine_count(&self) -> usize {
        Board::mine_count(self)
    }
}

impl std::fmt::Display for Board {
    /// Render the answer key: `*` for mines, `.` elsewhere.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.config.height() {
            for col in 0..self.config.width() {
                let glyph = if self.mines.contains(&Cell::new(row, col)) {
                    '*'
                } else {
                    '.'
                };
                write!(f, "{}", glyph)?;
            }
            if row + 1 < self.config.height() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
