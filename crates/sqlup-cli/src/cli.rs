//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// sqlup - apply a directory of SQL migration files exactly once, in order
#[derive(Parser, Debug)]
#[command(name = "sqlup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory (where sqlup.yml lives)
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply every migration not yet recorded in sql.lock
    Run(RunArgs),

    /// Show which migrations are applied and which are pending
    Status(StatusArgs),
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Migrations directory (default: migrations_dir from config)
    pub dir: Option<PathBuf>,

    /// Override database path (DuckDB file or :memory:)
    #[arg(short, long)]
    pub database: Option<String>,

    /// Accepted file extensions (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub extensions: Option<Vec<String>>,

    /// Reject files containing high-risk keywords
    #[arg(long)]
    pub high_risk: bool,

    /// High-risk keywords (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub high_risk_keywords: Option<Vec<String>>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: RunOutput,
}

/// Run output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutput {
    /// Human-readable per-statement listing
    Text,
    /// JSON report
    Json,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Migrations directory (default: migrations_dir from config)
    pub dir: Option<PathBuf>,

    /// Accepted file extensions (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub extensions: Option<Vec<String>>,

    /// Exit with code 1 when migrations are pending
    #[arg(long)]
    pub fail_on_pending: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: StatusOutput,
}

/// Status output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutput {
    /// Table format
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
