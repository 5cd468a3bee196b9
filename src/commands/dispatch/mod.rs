//! Command dispatch logic for malha

use std::time::Instant;

use crate::cli::Cli;
use malha_core::config::MalhaConfig;
use malha_core::error::Result;
use tracing::debug;

mod command;
mod commands;

pub use command::CommandContext;
use command::{Command, NoCommand};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let mut config = MalhaConfig::discover(cli.config.as_deref())?;
    if cli.directed {
        config.graph.directed = true;
    }

    debug!(elapsed = ?start.elapsed(), "load_config");

    let ctx = CommandContext::new(cli, config, start);

    // Execute command
    match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    }
}
