//! Testing utilities for the scorecard service
//!
//! This crate provides:
//! - Test fixtures for judges, teams and evaluations
//! - Builder patterns for evaluations with hand-picked scores
//! - In-memory mock repositories implementing the application ports
//! - Property-based testing strategies
//!
//! # Examples
//!
//! ```
//! use scorecard_testing::{builders::*, fixtures::*};
//! use scorecard_domain::{EventType, RoundNumber};
//!
//! let team = create_test_team(EventType::PaperPresentation);
//! let judge = create_test_judge(&[EventType::PaperPresentation]);
//!
//! let evaluation = EvaluationBuilder::new(&team, &judge)
//!     .with_round(RoundNumber::One, &[10, 10, 10, 10, 10])
//!     .with_remarks("Strong delivery")
//!     .build();
//! assert_eq!(evaluation.total_score, 50);
//! ```

pub mod builders;
pub mod fixtures;
pub mod mocks;
pub mod strategies;

// Re-export commonly used types
pub use builders::*;
pub use fixtures::*;
pub use mocks::*;

// Re-export testing dependencies for convenience
pub use fake;
pub use proptest;
