//! CLI commands

pub mod report;
pub mod rubric;

use crate::config::Config;

/// Context passed to commands that need configuration
pub struct CommandContext {
    pub config: Config,
}

impl CommandContext {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}
