//! # sweeper-ai
//!
//! A knowledge-based Minesweeper agent. The agent plays from what it
//! can prove. Each revealed cell's neighbor count becomes a logical
//! sentence; subset resolution combines sentences until nothing new
//! follows. Moves come from proven-safe cells before any guessing
//! happens.
//!
//! ## Design Principles
//!
//! 1. **Knowledge Is Explicit**: Everything the agent believes lives
//!    in inspectable sets and [`Sentence`] values. There is no hidden
//!    heuristic state, which makes deductions testable one by one.
//!
//! 2. **Agent Never Peeks**: Mine positions stay behind the
//!    [`Minefield`] trait. The agent receives only what a player
//!    would: the neighbor counts of cells it has revealed.
//!
//! 3. **Seeded Determinism**: All randomness (mine placement, guess
//!    selection) flows through [`AgentRng`], so any game can be
//!    replayed from its seeds.
//!
//! ## Architecture
//!
//! - **Persistent Sentences**: Cell sets use `im::OrdSet`, so deriving
//!   a sentence from another shares structure instead of copying.
//!
//! - **Fixed-Point Inference**: [`Agent::add_knowledge`] alternates
//!   direct-conclusion marking with subset resolution until a pass
//!   changes nothing. Queries then read settled knowledge.
//!
//! - **Driver Owns the Loop**: A [`Session`] ferries observations
//!   between board and agent and records the move history.
//!
//! ## Modules
//!
//! - `core`: Cell addressing, board configuration, deterministic RNG
//! - `knowledge`: Sentences and the inference agent
//! - `board`: Ground-truth mine placement
//! - `game`: The `Minefield` trait and session driver

pub mod core;
pub mod knowledge;
pub mod board;
pub mod game;

// Re-export commonly used types
pub use crate::core::{AgentRng, AgentRngState, BoardConfig, Cell};

pub use crate::knowledge::{Agent, Sentence};

pub use crate::board::Board;

pub use crate::game::{Minefield, MoveKind, MoveRecord, Outcome, Session, SessionStats};
