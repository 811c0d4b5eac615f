//! Session driver: plays an agent against a minefield to completion.
//!
//! The driver owns the feedback loop the agent itself never sees:
//! ask the agent for a move (proven-safe first, random fallback),
//! reveal that cell on the board, and feed the resulting neighbor
//! count back as knowledge. Boards are reached only through the
//! [`Minefield`] trait, so tests and alternative board sources plug
//! in without touching the driver.
//!
//! ## Usage
//!
//! ```
//! use sweeper_ai::{AgentRng, Board, BoardConfig, Outcome, Session};
//!
//! let config = BoardConfig::new(4, 4);
//! let mut rng = AgentRng::new(7);
//! let board = Board::generate(config, 3, &mut rng);
//!
//! let mut session = Session::new(&board, 42);
//! let outcome = session.run();
//!
//! match outcome {
//!     Outcome::Cleared => assert_eq!(session.agent().moves_made().len(), board.safe_area()),
//!     Outcome::Detonated(cell) => assert!(board.is_mine(cell)),
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{AgentRng, BoardConfig, Cell};
use crate::knowledge::Agent;

/// What a session needs to know about a board.
///
/// Implementations answer only the questions a legal reveal exposes.
/// `is_mine` may be consulted freely because the driver, not the
/// agent, calls it; the agent sees nothing but neighbor counts.
pub trait Minefield {
    /// Grid dimensions.
    fn config(&self) -> BoardConfig;

    /// Whether `cell` holds a mine.
    fn is_mine(&self, cell: Cell) -> bool;

    /// Number of mines adjacent to `cell`.
    fn neighbor_mines(&self, cell: Cell) -> usize;

    /// Total number of mines.
    fn mine_count(&self) -> usize;

    /// Number of non-mine cells. Revealing all of them wins.
    fn safe_area(&self) -> usize {
        self.config().area() - self.mine_count()
    }
}

/// Terminal result of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Every non-mine cell was revealed.
    Cleared,
    /// A mine was revealed at the given cell.
    Detonated(Cell),
}

impl Outcome {
    /// Whether the board was cleared.
    #[must_use]
    pub const fn is_cleared(self) -> bool {
        matches!(self, Outcome::Cleared)
    }

    /// Whether the session ended on a mine.
    #[must_use]
    pub const fn is_detonated(self) -> bool {
        matches!(self, Outcome::Detonated(_))
    }
}

/// How a move was chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    /// Proven safe before being revealed.
    Deduced,
    /// Picked uniformly from the unresolved cells.
    Random,
}

/// One revealed cell in a session, in play order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// 1-based turn number.
    pub turn: u32,
    /// The revealed cell.
    pub cell: Cell,
    /// Whether the move was deduced or a guess.
    pub kind: MoveKind,
}

/// Aggregate numbers for a finished (or in-flight) session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Moves played so far.
    pub turns: u32,
    /// Moves that were proven safe before play.
    pub deduced_moves: u32,
    /// Moves that were guesses.
    pub random_moves: u32,
    /// Mines the agent has identified.
    pub mines_identified: u32,
}

impl SessionStats {
    /// Fraction of moves that were deduced rather than guessed.
    ///
    /// Zero when no moves have been played.
    #[must_use]
    pub fn deduction_rate(&self) -> f64 {
        if self.turns == 0 {
            return 0.0;
        }
        f64::from(self.deduced_moves) / f64::from(self.turns)
    }
}

/// A single game of an [`Agent`] against a [`Minefield`].
///
/// The session prefers proven-safe moves and falls back to random
/// ones, revealing cells until the board is cleared or a mine goes
/// off. All randomness comes from the session's own RNG, so a seed
/// fixes the full trajectory.
pub struct Session<'a, F: Minefield> {
    field: &'a F,
    agent: Agent,
    rng: AgentRng,
    history: Vec<MoveRecord>,
    outcome: Option<Outcome>,
}

impl<'a, F: Minefield> Session<'a, F> {
    /// Start a session with a fresh agent and the given move seed.
    #[must_use]
    pub fn new(field: &'a F, seed: u64) -> Self {
        Self::with_agent(field, Agent::new(field.config()), AgentRng::new(seed))
    }

    /// Start a session from an existing agent and RNG.
    ///
    /// This is the resume path: a checkpointed agent and RNG state
    /// continue exactly where they left off.
    #[must_use]
    pub fn with_agent(field: &'a F, agent: Agent, rng: AgentRng) -> Self {
        assert!(
            agent.config() == field.config(),
            "Agent grid {:?} does not match board grid {:?}",
            agent.config(),
            field.config()
        );

        Self {
            field,
            agent,
            rng,
            history: Vec::new(),
            outcome: None,
        }
    }

    /// The agent and everything it has deduced so far.
    #[must_use]
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Moves played so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// The terminal result, if the session has ended.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Whether the session has ended.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Aggregate numbers for the session so far.
    #[must_use]
    pub fn stats(&self) -> SessionStats {
        let deduced = self
            .history
            .iter()
            .filter(|record| record.kind == MoveKind::Deduced)
            .count() as u32;
        let turns = self.history.len() as u32;

        SessionStats {
            turns,
            deduced_moves: deduced,
            random_moves: turns - deduced,
            mines_identified: self.agent.mines().len() as u32,
        }
    }

    /// Play one move.
    ///
    /// Returns `None` while the game continues, `Some(outcome)` once
    /// it ends. Calling `step` on a finished session replays nothing
    /// and returns the outcome again.
    pub fn step(&mut self) -> Option<Outcome> {
        if self.outcome.is_some() {
            return self.outcome;
        }

        if self.agent.moves_made().len() >= self.field.safe_area() {
            self.outcome = Some(Outcome::Cleared);
            return self.outcome;
        }

        let (cell, kind) = match self.agent.make_safe_move() {
            Some(cell) => (cell, MoveKind::Deduced),
            None => match self.agent.make_random_move(&mut self.rng) {
                Some(cell) => (cell, MoveKind::Random),
                // Every unrevealed cell is a known mine, so the safe
                // cells are exhausted
                None => {
                    self.outcome = Some(Outcome::Cleared);
                    return self.outcome;
                }
            },
        };

        self.history.push(MoveRecord {
            turn: self.history.len() as u32 + 1,
            cell,
            kind,
        });

        if self.field.is_mine(cell) {
            self.outcome = Some(Outcome::Detonated(cell));
            return self.outcome;
        }

        self.agent.add_knowledge(cell, self.field.neighbor_mines(cell));
        None
    }

    /// Play until the session ends and return the outcome.
    pub fn run(&mut self) -> Outcome {
        loop {
            if let Some(outcome) = self.step() {
                return outcome;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn test_outcome_predicates() {
        assert!(Outcome::Cleared.is_cleared());
        assert!(!Outcome::Cleared.is_detonated());

        let boom = Outcome::Detonated(Cell::new(1, 2));
        assert!(boom.is_detonated());
        assert!(!boom.is_cleared());
    }

    #[test]
    fn test_mine_free_board_always_clears() {
        let board = Board::from_mines(BoardConfig::new(4, 4), []);
        let mut session = Session::new(&board, 123);

        assert_eq!(session.run(), Outcome::Cleared);
        assert_eq!(session.agent().moves_made().len(), 16);
        assert!(session.is_finished());
    }

    #[test]
    fn test_step_after_finish_is_inert() {
        let board = Board::from_mines(BoardConfig::new(2, 2), []);
        let mut session = Session::new(&board, 5);
        let outcome = session.run();

        let turns = session.history().len();
        assert_eq!(session.step(), Some(outcome));
        assert_eq!(session.history().len(), turns);
    }

    #[test]
    fn test_omniscient_agent_clears_without_guessing() {
        let board = Board::from_mines(BoardConfig::new(2, 2), [Cell::new(0, 0)]);

        let mut agent = Agent::new(board.config());
        agent.mark_mine(Cell::new(0, 0));
        agent.mark_safe(Cell::new(0, 1));
        agent.mark_safe(Cell::new(1, 0));
        agent.mark_safe(Cell::new(1, 1));

        let mut session = Session::with_agent(&board, agent, AgentRng::new(9));
        assert_eq!(session.run(), Outcome::Cleared);

        // Safe moves come out in row-major order, and no guesses
        let cells: Vec<Cell> = session.history().iter().map(|r| r.cell).collect();
        assert_eq!(cells, vec![Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)]);
        assert!(session
            .history()
            .iter()
            .all(|r| r.kind == MoveKind::Deduced));

        let stats = session.stats();
        assert_eq!(stats.turns, 3);
        assert_eq!(stats.deduced_moves, 3);
        assert_eq!(stats.random_moves, 0);
        assert_eq!(stats.mines_identified, 1);
        assert!((stats.deduction_rate() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_turns_number_from_one() {
        let board = Board::from_mines(BoardConfig::new(3, 3), []);
        let mut session = Session::new(&board, 0);
        session.run();

        for (index, record) in session.history().iter().enumerate() {
            assert_eq!(record.turn, index as u32 + 1);
        }
    }

    #[test]
    #[should_panic(expected = "does not match board grid")]
    fn test_mismatched_agent_rejected() {
        let board = Board::from_mines(BoardConfig::new(3, 3), []);
        let agent = Agent::new(BoardConfig::new(5, 5));
        let _ = Session::with_agent(&board, agent, AgentRng::new(0));
    }

    #[test]
    fn test_stats_default_rate() {
        let stats = SessionStats::default();
        assert_eq!(stats.deduction_rate(), 0.0);
    }
}
