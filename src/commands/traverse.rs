//! `malha traverse`: BFS/DFS with layers and cycles

use serde::Serialize;

use crate::cli::commands::TraverseArgs;
use crate::cli::output::{format_path, print_json};
use crate::cli::OutputFormat;
use crate::commands::dispatch::CommandContext;
use malha_core::error::Result;
use malha_core::graph::{bfs_traverse, dfs_traverse, TraversalResult, TraversalStrategy};

#[derive(Debug, Serialize)]
struct TraverseOutput<'a> {
    source: &'a str,
    strategy: TraversalStrategy,
    max_cycles: usize,
    #[serde(flatten)]
    result: &'a TraversalResult,
}

pub fn execute(ctx: &CommandContext, args: &TraverseArgs) -> Result<()> {
    let (graph, _) = ctx.load_graph(&args.edges)?;
    let source = ctx.node_name(&args.source);
    let max_cycles = args.max_cycles.unwrap_or(ctx.config.traversal.max_cycles);

    let result = match args.strategy {
        TraversalStrategy::Bfs => bfs_traverse(&graph, &source, max_cycles)?,
        TraversalStrategy::Dfs => dfs_traverse(&graph, &source, max_cycles)?,
    };

    match ctx.cli.format {
        OutputFormat::Json => print_json(&TraverseOutput {
            source: &source,
            strategy: args.strategy,
            max_cycles,
            result: &result,
        }),
        OutputFormat::Human => {
            output_human(ctx, &source, args.strategy, &result);
            Ok(())
        }
    }
}

fn output_human(
    ctx: &CommandContext,
    source: &str,
    strategy: TraversalStrategy,
    result: &TraversalResult,
) {
    let level_name = match strategy {
        TraversalStrategy::Bfs => "layer",
        TraversalStrategy::Dfs => "depth",
    };

    println!(
        "{} from {}: {} nodes reached",
        strategy.to_string().to_uppercase(),
        source,
        result.order.len()
    );
    if !ctx.cli.quiet {
        println!("order: {}", result.order.join(", "));
    }
    for (level, nodes) in result.layers.iter().enumerate() {
        println!("  {level_name} {level}: {}", nodes.join(", "));
    }

    if result.cycles.is_empty() {
        println!("no cycles");
        return;
    }
    println!("cycles ({}):", result.cycles.len());
    for cycle in &result.cycles {
        // Close the loop visually
        let mut closed = cycle.clone();
        if let Some(first) = cycle.first() {
            closed.push(first.clone());
        }
        println!("  {}", format_path(&closed));
    }
}
