//! Malha - weighted graph routing CLI
//!
//! Loads adjacency tables into a weighted graph and answers shortest path,
//! traversal and structural questions about it.

mod cli;
mod commands;

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use cli::errors::{self, ErrorReporter};
use cli::Cli;
use malha_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return parse_failure(err),
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("warning: logging disabled: {e}");
    }
    tracing::debug!(elapsed = ?start.elapsed(), "args_parsed");

    let code = match commands::dispatch::run(&cli, start) {
        Ok(()) => malha_core::error::ExitCode::Success,
        Err(e) => ErrorReporter::for_cli(&cli).report(&e),
    };
    ExitCode::from(code as u8)
}

/// clap owns help, version and human-format usage output; a JSON request
/// gets malha's envelope instead
fn parse_failure(err: clap::Error) -> ExitCode {
    let reporter = ErrorReporter::from_args(env::args().skip(1));
    match errors::from_clap(&err) {
        Some(malha_error) if reporter.wants_json() => {
            ExitCode::from(reporter.report(&malha_error) as u8)
        }
        _ => err.exit(),
    }
}
