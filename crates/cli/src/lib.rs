//! Scorecard CLI library
//!
//! Offline tooling for the judging service: print scoring rubrics and turn a
//! team snapshot into the evaluation report.

pub mod commands;
pub mod config;
pub mod output;

pub use config::Config;
pub use output::{JsonFormatter, OutputFormat, PlainFormatter, ReportFormat, TableFormatter};

/// Re-export common types
pub use anyhow::{Context, Result};
