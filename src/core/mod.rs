//! Core types: cell addressing, board configuration, deterministic RNG.
//!
//! These are the building blocks shared by the knowledge engine, the
//! board, and the session driver. None of them know anything about
//! mines or inference.

pub mod cell;
pub mod config;
pub mod rng;

pub use cell::Cell;
pub use config::BoardConfig;
pub use rng::{AgentRng, AgentRngState};
