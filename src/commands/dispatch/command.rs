//! Command trait and context for dispatching commands

use std::path::Path;
use std::time::Instant;

use crate::cli::Cli;
use malha_core::config::MalhaConfig;
use malha_core::error::Result;
use malha_core::graph::WeightedGraph;
use malha_core::io::{self, LoadStats};

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub config: MalhaConfig,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, config: MalhaConfig, start: Instant) -> Self {
        Self { cli, config, start }
    }

    /// Load an edge list with the configured columns and graph options
    pub fn load_graph(&self, path: &Path) -> Result<(WeightedGraph, LoadStats)> {
        let loaded = io::load_edges(path, &self.config.columns, &self.config.graph)?;
        tracing::debug!(elapsed = ?self.start.elapsed(), "load_graph");
        Ok(loaded)
    }

    /// Node name as the graph stores it
    pub fn node_name(&self, raw: &str) -> String {
        if self.config.graph.normalize_names {
            io::normalize_name(raw)
        } else {
            raw.trim().to_string()
        }
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("malha {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Shortest paths, traversals and cycle detection over weighted adjacency tables.");
        println!();
        println!("Run `malha --help` for usage information.");
        Ok(())
    }
}
