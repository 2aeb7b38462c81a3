//! CLI configuration
//!
//! The CLI only needs the report layout. It is read from the `[report]`
//! section of a TOML file (`config/default.toml` unless `--config` names
//! another) and `APP_REPORT__*` environment variables.

use anyhow::{Context, Result};
use scorecard_common::ReportConfig;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_CONFIG_FILE: &str = "config/default";

/// CLI configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Evaluation report layout
    #[serde(default)]
    pub report: ReportConfig,
}

impl Config {
    /// Load configuration, falling back to defaults for anything unset
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config: Config = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Failed to parse configuration")?;

        if config.report.title.trim().is_empty() {
            anyhow::bail!("Report title must not be empty");
        }

        Ok(config)
    }
}
