//! `malha path`: one shortest path query

use serde::Serialize;

use crate::cli::commands::PathArgs;
use crate::cli::output::{format_cost, format_path, print_json};
use crate::cli::OutputFormat;
use crate::commands::dispatch::CommandContext;
use crate::commands::route::Route;
use malha_core::error::Result;
use malha_core::graph::{PathAlgorithm, PathOutcome};

#[derive(Debug, Serialize)]
struct PathOutput<'a> {
    algorithm: PathAlgorithm,
    #[serde(flatten)]
    route: &'a Route,
    #[serde(flatten)]
    outcome: &'a PathOutcome,
}

pub fn execute(ctx: &CommandContext, args: &PathArgs) -> Result<()> {
    let (graph, _) = ctx.load_graph(&args.edges)?;

    let via = args.via.as_deref().map(|name| ctx.node_name(name));
    let route = Route::resolve(
        &ctx.config,
        &ctx.node_name(&args.from),
        &ctx.node_name(&args.to),
        via.as_deref(),
    );
    tracing::debug!(?route, algorithm = %args.algorithm, "resolved_route");

    let outcome = route.evaluate(&graph, args.algorithm)?;

    match ctx.cli.format {
        OutputFormat::Json => print_json(&PathOutput {
            algorithm: args.algorithm,
            route: &route,
            outcome: &outcome,
        }),
        OutputFormat::Human => {
            match &outcome {
                PathOutcome::Found { distance, path } => {
                    println!("{}", format_path(path));
                    println!("cost: {}", format_cost(*distance));
                    if !ctx.cli.quiet {
                        if let Some(via) = &route.via {
                            println!("via: {via}");
                        }
                        println!("hops: {}", path.len().saturating_sub(1));
                    }
                }
                PathOutcome::Unreachable => {
                    println!("no path from {} to {}", route.origin, route.destination);
                }
            }
            Ok(())
        }
    }
}
