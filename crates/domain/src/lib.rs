//! Scorecard Domain Types
//!
//! Core domain model for the competition scorecard: events and their scoring
//! rubrics, judges, teams and the evaluations judges write for teams.
//!
//! ## Architecture
//!
//! - **identifiers**: Strongly-typed UUID-based identifiers for all entities
//! - **event**: The competition events
//! - **rubric**: Read-only scoring rubric per event
//! - **judge**: Judge accounts and event assignments
//! - **team**: Teams and their rosters
//! - **evaluation**: Per-judge, per-round question scores
//! - **errors**: Error types with HTTP status codes
//!
//! ## Usage
//!
//! ```rust
//! use scorecard_domain::{rubric, EventType};
//!
//! assert_eq!(rubric::total_max_score("paper-presentation"), 100);
//! assert!(rubric::schema_for("hackathon").is_empty());
//!
//! let event: EventType = "startup-expo".parse().unwrap();
//! assert_eq!(event.label(), "Startup Expo");
//! ```

#![warn(clippy::all)]

pub mod errors;
pub mod evaluation;
pub mod event;
pub mod identifiers;
pub mod judge;
pub mod rubric;
pub mod team;

// Re-export commonly used types
pub use errors::{AppError, AppResult};
pub use evaluation::{Evaluation, QuestionScore, Round, RoundNumber};
pub use event::{EventType, UnknownEventType};
pub use identifiers::*;
pub use judge::Judge;
pub use rubric::ScoringParameter;
pub use team::{Team, TeamMember};
