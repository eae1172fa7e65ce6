//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Waypoint - a linear SQL schema migration tracker
#[derive(Parser, Debug)]
#[command(name = "wp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute; bare `wp` shows status
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Answer yes to every prompt (non-interactive use)
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show applied migrations against the available catalog
    Status(StatusArgs),

    /// Apply the next migration
    Up,

    /// Revert the most recently applied migration
    Down,

    /// Scaffold a new empty up/down migration pair
    New(NewArgs),

    /// Reconcile a diverged history: roll back to the last aligned
    /// migration, then replay forward
    Merge,

    /// Clear local migration bookkeeping without running any scripts
    Reset,

    /// Force-run a single migration outside normal sequencing
    Run(RunArgs),
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: StatusFormat,
}

/// Status output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFormat {
    /// Human-readable listing
    Text,
    /// Machine-readable JSON
    Json,
}

/// Arguments for the new command
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Descriptive migration name
    #[arg(default_value = "unnamed")]
    pub name: String,
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Migration reference: `<up|down>.<id>[.<name>]`
    pub target: String,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
