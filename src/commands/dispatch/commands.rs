//! Command implementations for all malha commands

use crate::cli::Commands;
use crate::commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use malha_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::Info(args) => commands::info::execute(ctx, args),
            Commands::Path(args) => commands::path::execute(ctx, args),
            Commands::Batch(args) => commands::batch::execute(ctx, args),
            Commands::Traverse(args) => commands::traverse::execute(ctx, args),
            Commands::Metrics(args) => commands::metrics::execute(ctx, args),
            Commands::Report(args) => commands::report::execute(ctx, args),
        }
    }
}
