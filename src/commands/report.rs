//! `malha report`: run every algorithm over a node sample and time it

use std::collections::BTreeMap;
use std::fs::File;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::commands::ReportArgs;
use crate::cli::output::{format_cost, print_json};
use crate::cli::OutputFormat;
use crate::commands::dispatch::CommandContext;
use crate::commands::route::shortest_path;
use malha_core::error::{MalhaError, Result};
use malha_core::graph::metrics::{self, GraphSummary};
use malha_core::graph::{
    bfs_traverse, dfs_traverse, PathAlgorithm, PathOutcome, TraversalStrategy, WeightedGraph,
};

#[derive(Debug, Serialize)]
pub struct TraversalTiming {
    pub strategy: TraversalStrategy,
    pub source: String,
    pub millis: f64,
    pub visited: usize,
    pub depth: usize,
    pub cycles: usize,
}

#[derive(Debug, Serialize)]
pub struct PathTiming {
    pub algorithm: PathAlgorithm,
    pub origin: String,
    pub destination: String,
    pub millis: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    pub hops: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub edges: String,
    pub summary: GraphSummary,
    pub samples: Vec<String>,
    pub traversals: Vec<TraversalTiming>,
    pub paths: Vec<PathTiming>,
    /// Total milliseconds per algorithm
    pub totals: BTreeMap<String, f64>,
}

fn millis_since(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

fn time_traversal(
    graph: &WeightedGraph,
    strategy: TraversalStrategy,
    source: &str,
    max_cycles: usize,
) -> Result<TraversalTiming> {
    let start = Instant::now();
    let result = match strategy {
        TraversalStrategy::Bfs => bfs_traverse(graph, source, max_cycles)?,
        TraversalStrategy::Dfs => dfs_traverse(graph, source, max_cycles)?,
    };
    Ok(TraversalTiming {
        strategy,
        source: source.to_string(),
        millis: millis_since(start),
        visited: result.order.len(),
        depth: result.layers.len().saturating_sub(1),
        cycles: result.cycles.len(),
    })
}

/// Time one query; engine failures are kept in the entry
fn time_path(
    graph: &WeightedGraph,
    algorithm: PathAlgorithm,
    origin: &str,
    destination: &str,
) -> Result<PathTiming> {
    let start = Instant::now();
    let outcome = shortest_path(graph, algorithm, origin, destination);
    let mut timing = PathTiming {
        algorithm,
        origin: origin.to_string(),
        destination: destination.to_string(),
        millis: millis_since(start),
        cost: None,
        hops: 0,
        error: None,
    };

    match outcome {
        Ok(PathOutcome::Found { distance, path }) => {
            timing.cost = Some(distance);
            timing.hops = path.len().saturating_sub(1);
        }
        Ok(PathOutcome::Unreachable) => {
            timing.error = Some(MalhaError::no_path(origin, destination).to_json()["error"].clone());
        }
        Err(e) if e.is_query_failure() => timing.error = Some(e.to_json()["error"].clone()),
        Err(e) => return Err(e),
    }
    Ok(timing)
}

pub fn build_report(
    ctx: &CommandContext,
    graph: &WeightedGraph,
    args: &ReportArgs,
) -> Result<Report> {
    let samples: Vec<String> = graph.nodes().take(args.samples).map(str::to_string).collect();
    let max_cycles = ctx.config.traversal.max_cycles;
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();

    let mut traversals = Vec::new();
    for source in &samples {
        for strategy in [TraversalStrategy::Bfs, TraversalStrategy::Dfs] {
            let timing = time_traversal(graph, strategy, source, max_cycles)?;
            *totals.entry(strategy.to_string()).or_default() += timing.millis;
            traversals.push(timing);
        }
    }

    let mut paths = Vec::new();
    for origin in &samples {
        for destination in samples.iter().filter(|d| *d != origin) {
            for algorithm in [PathAlgorithm::Dijkstra, PathAlgorithm::BellmanFord] {
                let timing = time_path(graph, algorithm, origin, destination)?;
                *totals.entry(algorithm.to_string()).or_default() += timing.millis;
                paths.push(timing);
            }
        }
    }

    Ok(Report {
        generated_at: Utc::now(),
        edges: args.edges.display().to_string(),
        summary: metrics::summary(graph),
        samples,
        traversals,
        paths,
        totals,
    })
}

pub fn execute(ctx: &CommandContext, args: &ReportArgs) -> Result<()> {
    let (graph, _) = ctx.load_graph(&args.edges)?;
    let report = build_report(ctx, &graph, args)?;
    tracing::debug!(
        elapsed = ?ctx.start.elapsed(),
        paths = report.paths.len(),
        "report_built"
    );

    if let Some(path) = &args.out {
        let file = File::create(path)
            .map_err(|e| MalhaError::io_operation("create", path.display(), e))?;
        serde_json::to_writer_pretty(file, &report)?;
    }

    match ctx.cli.format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Human => {
            output_human(ctx, &report);
            Ok(())
        }
    }
}

fn output_human(ctx: &CommandContext, report: &Report) {
    println!("report for {} ({})", report.edges, report.generated_at.to_rfc3339());
    println!(
        "  {} nodes, {} edges, sampled {}",
        report.summary.order,
        report.summary.size,
        report.samples.len()
    );
    for (algorithm, millis) in &report.totals {
        println!("  {algorithm}: {millis:.3} ms total");
    }

    if ctx.cli.quiet {
        return;
    }
    for timing in &report.traversals {
        println!(
            "  {} {}: {} visited, depth {}, {} cycles, {:.3} ms",
            timing.strategy, timing.source, timing.visited, timing.depth, timing.cycles, timing.millis
        );
    }
    for timing in &report.paths {
        let result = match (&timing.cost, &timing.error) {
            (Some(cost), _) => format!("cost {}", format_cost(*cost)),
            (None, Some(error)) => error["type"].as_str().unwrap_or("error").to_string(),
            (None, None) => "no result".to_string(),
        };
        println!(
            "  {} {} -> {}: {}, {:.3} ms",
            timing.algorithm, timing.origin, timing.destination, result, timing.millis
        );
    }
}
