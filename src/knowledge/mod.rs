//! The inference engine: sentences and the agent that accumulates them.
//!
//! Knowledge about a board is held as [`Sentence`]s ("exactly N of
//! these cells are mines"). The [`Agent`] ingests reveal observations,
//! runs direct-conclusion marking and subset resolution to a fixed
//! point, and answers move queries from what was proven.

pub mod agent;
pub mod sentence;

pub use agent::Agent;
pub use sentence::Sentence;
