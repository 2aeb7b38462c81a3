//! Scorecard CLI
//!
//! Command-line access to scoring rubrics and team evaluation reports.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use scorecard_cli::commands::{report, rubric, CommandContext};
use scorecard_cli::config::Config;
use scorecard_cli::output::{OutputFormat, ReportFormat};

#[derive(Parser, Debug)]
#[command(name = "scorecard")]
#[command(author, version, about = "Scorecard CLI")]
#[command(long_about = "Command-line interface for the competition scorecard.\n\n\
    Print the scoring rubric of an event, or render a team's evaluation report \
    from a snapshot file as a table, JSON or PDF.")]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file with a [report] section
    #[arg(short, long, global = true, env = "SCORECARD_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print an event's scoring rubric
    #[command(alias = "r")]
    Rubric {
        /// Event identifier, e.g. paper-presentation; all events when omitted
        #[arg(value_name = "EVENT")]
        event: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Render a team's evaluation report from a snapshot file
    Report {
        /// Snapshot JSON: {"team": ..., "evaluations": [...]}
        #[arg(short, long)]
        input: PathBuf,

        /// Report format
        #[arg(short, long, value_enum, default_value = "table")]
        format: ReportFormat,

        /// Directory the PDF is written to
        #[arg(long, default_value = ".")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    scorecard_common::init_tracing("scorecard-cli", false, log_level)?;

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = Config::load(cli.config.as_deref())?;
    let ctx = CommandContext::new(config);

    let result = match cli.command {
        Commands::Rubric { event, format } => rubric::show(event, format),
        Commands::Report {
            input,
            format,
            output,
        } => report::generate(&ctx, input, format, output),
    };

    if let Err(e) = result {
        use colored::Colorize;
        eprintln!("{} {}", "Error:".red().bold(), e);
        if cli.verbose {
            eprintln!("\n{}", "Backtrace:".dimmed());
            eprintln!("{:?}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}
