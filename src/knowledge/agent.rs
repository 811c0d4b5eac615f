//! The knowledge-base agent: observation intake and inference.
//!
//! An `Agent` accumulates everything established about one board:
//! which cells were revealed, which are proven safe, which are proven
//! mines, and a list of still-undecided [`Sentence`]s. Feeding it an
//! observation via [`Agent::add_knowledge`] runs inference to a fixed
//! point, after which the move queries answer from settled knowledge.
//!
//! ## Inference
//!
//! Two rules, applied until neither makes progress:
//!
//! 1. **Direct conclusions**: a sentence whose count equals its size
//!    proves mines; a zero-count sentence proves safes. Proven cells
//!    are marked, which rewrites every sentence mentioning them.
//! 2. **Subset resolution**: for sentences `A` and `B` with
//!    `B.cells ⊆ A.cells`, the difference sentence
//!    `(A.cells − B.cells) = A.count − B.count` is added if novel.
//!
//! Each pass either marks a previously unknown cell or appends a
//! sentence not seen before; both are bounded on a finite grid, so
//! the loop terminates.
//!
//! ## Usage
//!
//! ```
//! use sweeper_ai::{Agent, BoardConfig, Cell};
//!
//! let mut agent = Agent::new(BoardConfig::new(3, 3));
//!
//! // A zero reading proves the whole neighborhood safe
//! agent.add_knowledge(Cell::new(2, 2), 0);
//! assert!(agent.is_known_safe(Cell::new(1, 1)));
//!
//! // Proven-safe cells feed the next move, lowest cell first
//! assert_eq!(agent.make_safe_move(), Some(Cell::new(1, 1)));
//! ```

use im::OrdSet;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{AgentRng, BoardConfig, Cell};

use super::Sentence;

/// Knowledge base and move chooser for a single board.
///
/// The agent never touches a board directly. It consumes observations
/// (`cell` revealed, `count` adjacent mines) and answers queries; the
/// session driver owns the board and ferries data between the two.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Agent {
    config: BoardConfig,

    /// Cells actually revealed, in no particular order.
    moves_made: FxHashSet<Cell>,

    /// Cells proven free of mines. Superset of `moves_made`.
    safes: FxHashSet<Cell>,

    /// Cells proven to be mines.
    mines: FxHashSet<Cell>,

    /// Undecided sentences. Compaction keeps this free of empty and
    /// duplicate entries.
    knowledge: Vec<Sentence>,
}

impl Agent {
    /// Create an agent with no knowledge about a grid of the given
    /// dimensions.
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        Self {
            config,
            moves_made: FxHashSet::default(),
            safes: FxHashSet::default(),
            mines: FxHashSet::default(),
            knowledge: Vec::new(),
        }
    }

    /// Grid dimensions this agent reasons about.
    #[must_use]
    pub fn config(&self) -> BoardConfig {
        self.config
    }

    /// Cells revealed so far.
    #[must_use]
    pub fn moves_made(&self) -> &FxHashSet<Cell> {
        &self.moves_made
    }

    /// Cells proven safe (revealed or deduced).
    #[must_use]
    pub fn safes(&self) -> &FxHashSet<Cell> {
        &self.safes
    }

    /// Cells proven to be mines.
    #[must_use]
    pub fn mines(&self) -> &FxHashSet<Cell> {
        &self.mines
    }

    /// The undecided sentences currently held.
    #[must_use]
    pub fn knowledge(&self) -> &[Sentence] {
        &self.knowledge
    }

    /// Whether `cell` is proven safe.
    #[must_use]
    pub fn is_known_safe(&self, cell: Cell) -> bool {
        self.safes.contains(&cell)
    }

    /// Whether `cell` is proven to be a mine.
    #[must_use]
    pub fn is_known_mine(&self, cell: Cell) -> bool {
        self.mines.contains(&cell)
    }

    /// Record that `cell` is a mine and rewrite all sentences to
    /// reflect it.
    ///
    /// Marking an already-known mine changes nothing.
    pub fn mark_mine(&mut self, cell: Cell) {
        self.mines.insert(cell);
        for sentence in &mut self.knowledge {
            sentence.mark_mine(cell);
        }
    }

    /// Record that `cell` is safe and rewrite all sentences to
    /// reflect it.
    ///
    /// Marking an already-known safe cell changes nothing.
    pub fn mark_safe(&mut self, cell: Cell) {
        self.safes.insert(cell);
        for sentence in &mut self.knowledge {
            sentence.mark_safe(cell);
        }
    }

    /// Ingest one observation: `cell` was revealed and has `count`
    /// mines among its in-bounds neighbors.
    ///
    /// The cell is recorded as revealed and safe, a sentence over its
    /// still-undetermined neighbors is added (neighbors already known
    /// to be mines are dropped from the set and subtracted from the
    /// count), and inference runs to a fixed point.
    ///
    /// Callers must pass a cell that is not a mine, was not revealed
    /// before, and whose `count` is the true adjacent-mine total.
    /// Violating that cannot corrupt memory but poisons the knowledge
    /// base, after which deductions are unreliable.
    pub fn add_knowledge(&mut self, cell: Cell, count: usize) {
        assert!(self.config.contains(cell), "Cell out of bounds: {}", cell);

        self.moves_made.insert(cell);
        self.mark_safe(cell);

        // Sentence over the undetermined neighbors. Known mines fold
        // into the count instead of joining the set, so the sentence
        // is already consistent with prior knowledge.
        let mut cells = OrdSet::new();
        let mut remaining = count;
        for neighbor in self.config.neighbors(cell) {
            if self.mines.contains(&neighbor) {
                remaining -= 1;
            } else if !self.safes.contains(&neighbor) {
                cells.insert(neighbor);
            }
        }
        self.push_sentence(Sentence::new(cells, remaining));

        self.propagate_conclusions();
        self.infer();
        self.propagate_conclusions();
    }

    /// Assert an externally-known sentence.
    ///
    /// This is the seeding channel for constraints that do not come
    /// from a reveal (resumed games, test fixtures, hints). Cells
    /// already resolved are folded out first, then inference runs to
    /// a fixed point.
    pub fn add_sentence(&mut self, mut sentence: Sentence) {
        for cell in &self.mines {
            sentence.mark_mine(*cell);
        }
        for cell in &self.safes {
            sentence.mark_safe(*cell);
        }
        self.push_sentence(sentence);

        self.propagate_conclusions();
        self.infer();
        self.propagate_conclusions();
    }

    /// Run inference until no rule makes progress.
    ///
    /// `add_knowledge` and `add_sentence` call this automatically;
    /// calling it again at a fixed point changes nothing.
    pub fn infer(&mut self) {
        loop {
            let mut progress = self.propagate_conclusions();

            // Subset resolution over ordered pairs of current
            // sentences. Derived sentences are collected first and
            // appended after the scan, so one pass sees a stable list.
            let mut derived: Vec<Sentence> = Vec::new();
            for a in &self.knowledge {
                for b in &self.knowledge {
                    if a == b {
                        continue;
                    }
                    if let Some(resolvent) = a.resolve_with(b) {
                        if !self.knowledge.contains(&resolvent) && !derived.contains(&resolvent) {
                            derived.push(resolvent);
                        }
                    }
                }
            }

            if !derived.is_empty() {
                progress = true;
                self.knowledge.extend(derived);
            }

            if !progress {
                break;
            }
        }
    }

    /// A proven-safe cell that has not been revealed yet.
    ///
    /// Returns the lowest such cell in row-major order so replays are
    /// deterministic, or `None` when no unrevealed safe cell is known.
    /// Pure query: the knowledge base is untouched.
    #[must_use]
    pub fn make_safe_move(&self) -> Option<Cell> {
        self.safes
            .iter()
            .filter(|cell| !self.moves_made.contains(*cell))
            .min()
            .copied()
    }

    /// A uniformly random cell that is neither revealed nor a known
    /// mine.
    ///
    /// Returns `None` when every cell is either revealed or proven a
    /// mine. Pure query apart from advancing the caller's RNG; cells
    /// merely suspected of being mines are still candidates.
    #[must_use]
    pub fn make_random_move(&self, rng: &mut AgentRng) -> Option<Cell> {
        let candidates: Vec<Cell> = self
            .config
            .cells()
            .filter(|cell| !self.moves_made.contains(cell) && !self.mines.contains(cell))
            .collect();

        rng.choose(&candidates).copied()
    }

    /// Append a sentence unless it is vacuous or already held.
    fn push_sentence(&mut self, sentence: Sentence) {
        if !sentence.is_empty() && !self.knowledge.contains(&sentence) {
            self.knowledge.push(sentence);
        }
    }

    /// Mark every cell some sentence now proves, then compact.
    ///
    /// Returns true if anything new was marked. Conclusions are
    /// collected before marking because marking rewrites the very
    /// sentences being scanned.
    fn propagate_conclusions(&mut self) -> bool {
        let mut found_mines: Vec<Cell> = Vec::new();
        let mut found_safes: Vec<Cell> = Vec::new();

        for sentence in &self.knowledge {
            for cell in sentence.known_mines() {
                if !self.mines.contains(&cell) {
                    found_mines.push(cell);
                }
            }
            for cell in sentence.known_safes() {
                if !self.safes.contains(&cell) {
                    found_safes.push(cell);
                }
            }
        }

        if found_mines.is_empty() && found_safes.is_empty() {
            return false;
        }

        for cell in found_mines {
            self.mark_mine(cell);
        }
        for cell in found_safes {
            self.mark_safe(cell);
        }

        self.compact_knowledge();
        true
    }

    /// Drop emptied sentences and collapse duplicates, preserving
    /// first-seen order.
    fn compact_knowledge(&mut self) {
        let mut compacted: Vec<Sentence> = Vec::with_capacity(self.knowledge.len());
        for sentence in self.knowledge.drain(..) {
            if !sentence.is_empty() && !compacted.contains(&sentence) {
                compacted.push(sentence);
            }
        }
        self.knowledge = compacted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent_4x4() -> Agent {
        Agent::new(BoardConfig::new(4, 4))
    }

    #[test]
    fn test_new_agent_is_blank() {
        let agent = agent_4x4();
        assert!(agent.moves_made().is_empty());
        assert!(agent.safes().is_empty());
        assert!(agent.mines().is_empty());
        assert!(agent.knowledge().is_empty());
        assert_eq!(agent.make_safe_move(), None);
    }

    #[test]
    fn test_add_knowledge_records_move_and_safety() {
        let mut agent = agent_4x4();
        agent.add_knowledge(Cell::new(1, 1), 1);

        assert!(agent.moves_made().contains(&Cell::new(1, 1)));
        assert!(agent.is_known_safe(Cell::new(1, 1)));
        assert_eq!(agent.knowledge().len(), 1);
    }

    #[test]
    #[should_panic(expected = "Cell out of bounds")]
    fn test_add_knowledge_rejects_out_of_bounds() {
        let mut agent = agent_4x4();
        agent.add_knowledge(Cell::new(9, 9), 0);
    }

    #[test]
    fn test_zero_count_proves_neighbors_safe() {
        let mut agent = agent_4x4();
        agent.add_knowledge(Cell::new(0, 0), 0);

        for cell in [Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)] {
            assert!(agent.is_known_safe(cell), "{} should be safe", cell);
        }
        // The satisfied sentence is compacted away
        assert!(agent.knowledge().is_empty());
    }

    #[test]
    fn test_saturated_count_proves_neighbors_mines() {
        let mut agent = agent_4x4();
        agent.add_knowledge(Cell::new(0, 0), 3);

        for cell in [Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)] {
            assert!(agent.is_known_mine(cell), "{} should be a mine", cell);
        }
        assert!(agent.knowledge().is_empty());
    }

    #[test]
    fn test_known_safe_neighbors_excluded_from_sentence() {
        let mut agent = agent_4x4();
        agent.mark_safe(Cell::new(0, 1));
        agent.mark_safe(Cell::new(1, 0));

        agent.add_knowledge(Cell::new(0, 0), 1);

        // Only (1, 1) is undetermined, so {(1, 1)} = 1 resolves at once
        assert!(agent.is_known_mine(Cell::new(1, 1)));
    }

    #[test]
    fn test_known_mine_neighbor_adjusts_count() {
        let mut agent = agent_4x4();
        agent.mark_mine(Cell::new(1, 1));

        // One of the corner's three neighbors is the known mine, so
        // the remaining two carry a count of zero
        agent.add_knowledge(Cell::new(0, 0), 1);

        assert!(agent.is_known_safe(Cell::new(0, 1)));
        assert!(agent.is_known_safe(Cell::new(1, 0)));
        assert!(agent.is_known_mine(Cell::new(1, 1)));
    }

    #[test]
    fn test_mark_mine_rewrites_sentences() {
        let mut agent = agent_4x4();
        agent.add_knowledge(Cell::new(1, 1), 1);
        assert_eq!(agent.knowledge()[0].len(), 8);

        agent.mark_mine(Cell::new(0, 0));

        // The sentence loses the cell and its count; {7 cells} = 0
        // then proves everything else safe and compacts away
        agent.infer();
        assert!(agent.knowledge().is_empty());
        assert!(agent.is_known_safe(Cell::new(2, 2)));
    }

    #[test]
    fn test_marking_is_idempotent() {
        let mut agent = agent_4x4();
        agent.add_knowledge(Cell::new(1, 1), 2);

        agent.mark_mine(Cell::new(0, 0));
        let after_once = agent.clone();
        agent.mark_mine(Cell::new(0, 0));

        assert_eq!(agent.mines(), after_once.mines());
        assert_eq!(agent.knowledge(), after_once.knowledge());

        agent.mark_safe(Cell::new(3, 3));
        let after_once = agent.clone();
        agent.mark_safe(Cell::new(3, 3));

        assert_eq!(agent.safes(), after_once.safes());
        assert_eq!(agent.knowledge(), after_once.knowledge());
    }

    #[test]
    fn test_subset_resolution_derives_mine() {
        let mut agent = agent_4x4();
        let a = Cell::new(3, 0);
        let b = Cell::new(3, 1);
        let c = Cell::new(3, 2);

        agent.add_sentence(Sentence::new([a, b, c], 2));
        agent.add_sentence(Sentence::new([a, b], 1));

        // {a, b, c} = 2 minus {a, b} = 1 leaves {c} = 1
        assert!(agent.is_known_mine(c));
        assert!(!agent.is_known_mine(a));
        assert!(!agent.is_known_mine(b));

        // After marking c, both originals collapse to {a, b} = 1
        assert_eq!(agent.knowledge(), [Sentence::new([a, b], 1)].as_slice());
    }

    #[test]
    fn test_add_sentence_folds_known_cells() {
        let mut agent = agent_4x4();
        agent.mark_mine(Cell::new(0, 0));
        agent.mark_safe(Cell::new(0, 1));

        agent.add_sentence(Sentence::new(
            [Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2)],
            1,
        ));

        // The mine absorbs the count and the safe cell drops out,
        // leaving {(0, 2)} = 0
        assert!(agent.is_known_safe(Cell::new(0, 2)));
        assert!(agent.knowledge().is_empty());
    }

    #[test]
    fn test_infer_is_idempotent_at_fixed_point() {
        let mut agent = agent_4x4();
        agent.add_sentence(Sentence::new([Cell::new(0, 0), Cell::new(0, 1)], 1));
        agent.add_knowledge(Cell::new(3, 3), 1);

        let safes = agent.safes().clone();
        let mines = agent.mines().clone();
        let knowledge = agent.knowledge().to_vec();

        agent.infer();

        assert_eq!(agent.safes(), &safes);
        assert_eq!(agent.mines(), &mines);
        assert_eq!(agent.knowledge(), knowledge.as_slice());
    }

    #[test]
    fn test_repeated_observation_adds_nothing() {
        let mut agent = agent_4x4();
        agent.add_knowledge(Cell::new(1, 1), 2);
        let before = agent.knowledge().to_vec();

        // Same reveal again produces the same sentence, which the
        // duplicate guard drops
        agent.add_knowledge(Cell::new(1, 1), 2);
        assert_eq!(agent.knowledge(), before.as_slice());
    }

    #[test]
    fn test_make_safe_move_prefers_lowest_cell() {
        let mut agent = agent_4x4();
        agent.mark_safe(Cell::new(2, 1));
        agent.mark_safe(Cell::new(0, 3));
        agent.mark_safe(Cell::new(2, 0));

        assert_eq!(agent.make_safe_move(), Some(Cell::new(0, 3)));
    }

    #[test]
    fn test_make_safe_move_skips_revealed() {
        let mut agent = agent_4x4();
        agent.add_knowledge(Cell::new(0, 0), 0);

        // (0, 0) is safe but already revealed; its neighbors are not
        assert_eq!(agent.make_safe_move(), Some(Cell::new(0, 1)));
    }

    #[test]
    fn test_make_safe_move_none_without_candidates() {
        let mut agent = agent_4x4();
        assert_eq!(agent.make_safe_move(), None);

        // 3 of 8 neighbors decides nothing, and the reveal itself is
        // already made
        agent.add_knowledge(Cell::new(1, 1), 3);
        assert_eq!(agent.make_safe_move(), None);
    }

    #[test]
    fn test_make_random_move_avoids_moves_and_mines() {
        let mut agent = Agent::new(BoardConfig::new(2, 2));
        agent.add_knowledge(Cell::new(0, 0), 3);

        // All three neighbors are now known mines; no candidate left
        let mut rng = AgentRng::new(7);
        assert_eq!(agent.make_random_move(&mut rng), None);
    }

    #[test]
    fn test_make_random_move_returns_only_remaining_cell() {
        let mut agent = Agent::new(BoardConfig::new(1, 3));
        agent.add_knowledge(Cell::new(0, 0), 1);

        // {(0, 1)} = 1 proves (0, 1) a mine, leaving only (0, 2)
        assert!(agent.is_known_mine(Cell::new(0, 1)));

        let mut rng = AgentRng::new(7);
        for _ in 0..20 {
            assert_eq!(agent.make_random_move(&mut rng), Some(Cell::new(0, 2)));
        }
    }

    #[test]
    fn test_queries_do_not_mutate() {
        let mut agent = agent_4x4();
        agent.add_knowledge(Cell::new(1, 1), 1);
        let snapshot = agent.clone();

        let mut rng = AgentRng::new(1);
        let _ = agent.make_safe_move();
        let _ = agent.make_random_move(&mut rng);

        assert_eq!(agent.moves_made(), snapshot.moves_made());
        assert_eq!(agent.safes(), snapshot.safes());
        assert_eq!(agent.mines(), snapshot.mines());
        assert_eq!(agent.knowledge(), snapshot.knowledge());
    }

    #[test]
    fn test_serialization_round_trip() {
        let mut agent = agent_4x4();
        agent.add_knowledge(Cell::new(1, 1), 2);
        agent.add_knowledge(Cell::new(3, 3), 1);

        let json = serde_json::to_string(&agent).unwrap();
        let restored: Agent = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.config(), agent.config());
        assert_eq!(restored.moves_made(), agent.moves_made());
        assert_eq!(restored.safes(), agent.safes());
        assert_eq!(restored.mines(), agent.mines());
        assert_eq!(restored.knowledge(), agent.knowledge());
    }
}
