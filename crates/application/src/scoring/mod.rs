//! Scoring module - score aggregation and ranking
//!
//! Aggregates judges' evaluations of a team into the analytics table and
//! ranks the teams of an event by their marks.

mod aggregate;
mod cell;
mod leaderboard;

pub use aggregate::*;
pub use cell::*;
pub use leaderboard::*;
