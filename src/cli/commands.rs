//! Subcommands and their arguments

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::parse::{parse_algorithm, parse_positive, parse_strategy};
use malha_core::graph::{PathAlgorithm, TraversalStrategy};

/// Top-level malha commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize an edge list: order, size, density, load statistics
    Info(InfoArgs),

    /// Shortest path between two nodes
    Path(PathArgs),

    /// Evaluate every origin/destination pair of a query file
    Batch(BatchArgs),

    /// BFS or DFS from a node, with layers and cycles
    Traverse(TraverseArgs),

    /// Degree, density and ego-network metrics
    Metrics(MetricsArgs),

    /// Time every algorithm over a sample of nodes
    Report(ReportArgs),
}

/// Arguments for the info command.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Edge list CSV
    pub edges: PathBuf,
}

/// Arguments for the path command.
#[derive(Args, Debug)]
pub struct PathArgs {
    /// Edge list CSV
    pub edges: PathBuf,

    /// Origin node
    pub from: String,

    /// Destination node
    pub to: String,

    /// Shortest path algorithm (dijkstra, bellman-ford)
    #[arg(long, short, default_value = "dijkstra", value_parser = parse_algorithm)]
    pub algorithm: PathAlgorithm,

    /// Force the route through this node
    #[arg(long)]
    pub via: Option<String>,
}

/// Arguments for the batch command.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Edge list CSV
    pub edges: PathBuf,

    /// Query CSV with origin/destination columns
    pub queries: PathBuf,

    /// Shortest path algorithm (dijkstra, bellman-ford)
    #[arg(long, short, default_value = "dijkstra", value_parser = parse_algorithm)]
    pub algorithm: PathAlgorithm,

    /// Directory for routes.csv and per-route JSON files
    #[arg(long, short)]
    pub out: Option<PathBuf>,

    /// Per-query time budget in seconds (overrides `batch.timeout_secs`)
    #[arg(long, value_parser = parse_positive)]
    pub timeout_secs: Option<usize>,
}

/// Arguments for the traverse command.
#[derive(Args, Debug)]
pub struct TraverseArgs {
    /// Edge list CSV
    pub edges: PathBuf,

    /// Start node
    pub source: String,

    /// Traversal strategy (bfs, dfs)
    #[arg(long, short, default_value = "bfs", value_parser = parse_strategy)]
    pub strategy: TraversalStrategy,

    /// Maximum distinct cycles to record (overrides `traversal.max_cycles`)
    #[arg(long)]
    pub max_cycles: Option<usize>,
}

/// Arguments for the metrics command.
#[derive(Args, Debug)]
pub struct MetricsArgs {
    /// Edge list CSV
    pub edges: PathBuf,

    /// CSV assigning nodes to named groups
    #[arg(long)]
    pub groups: Option<PathBuf>,

    /// Include ego metrics for every node
    #[arg(long)]
    pub egos: bool,
}

/// Arguments for the report command.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Edge list CSV
    pub edges: PathBuf,

    /// Number of nodes to sample, in file order
    #[arg(long, default_value = "5", value_parser = parse_positive)]
    pub samples: usize,

    /// Also write the JSON report to this file
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}
