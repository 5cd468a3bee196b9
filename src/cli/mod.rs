//! CLI argument parsing for malha
//!
//! Global flags: --config, --format, --quiet, --verbose, --log-level,
//! --log-json, --directed

pub mod commands;
pub mod errors;
pub mod output;
pub mod parse;

use std::path::PathBuf;

use clap::Parser;

pub use commands::Commands;
pub use output::OutputFormat;

/// Malha - shortest paths, traversals and cycle detection over weighted
/// adjacency tables
#[derive(Parser, Debug)]
#[command(name = "malha")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (default: ./malha.toml, then the user config dir)
    #[arg(long, global = true, env = "MALHA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Debug-level logging on stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Explicit log filter (e.g. `info`, `malha_core=trace`)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Treat edge lists as directed (overrides `graph.directed`)
    #[arg(long, global = true)]
    pub directed: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
