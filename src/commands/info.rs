//! `malha info`: graph summary and load statistics

use serde::Serialize;

use crate::cli::commands::InfoArgs;
use crate::cli::output::print_json;
use crate::cli::OutputFormat;
use crate::commands::dispatch::CommandContext;
use malha_core::error::Result;
use malha_core::graph::metrics::{self, GraphSummary};
use malha_core::io::LoadStats;

#[derive(Debug, Serialize)]
struct InfoOutput<'a> {
    edges: String,
    summary: GraphSummary,
    load: &'a LoadStats,
}

pub fn execute(ctx: &CommandContext, args: &InfoArgs) -> Result<()> {
    let (graph, stats) = ctx.load_graph(&args.edges)?;
    let summary = metrics::summary(&graph);

    match ctx.cli.format {
        OutputFormat::Json => print_json(&InfoOutput {
            edges: args.edges.display().to_string(),
            summary,
            load: &stats,
        }),
        OutputFormat::Human => {
            println!("{}", args.edges.display());
            println!(
                "  {} nodes, {} edges ({})",
                summary.order,
                summary.size,
                if summary.directed { "directed" } else { "undirected" }
            );
            println!("  density: {:.4}", summary.density);
            if summary.has_negative_edge {
                println!(
                    "  negative edges: {} (use --algorithm bellman-ford)",
                    stats.negative_edges
                );
            }
            if !ctx.cli.quiet {
                println!(
                    "  rows: {}, skipped: {}, self-loops: {}",
                    stats.rows, stats.skipped_rows, stats.self_loops
                );
            }
            Ok(())
        }
    }
}
