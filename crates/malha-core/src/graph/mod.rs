//! Weighted graph model and the algorithms that run over it
//!
//! - `weighted`: adjacency-list graph with interned node ids
//! - `provider`: read-only neighbor-iteration trait the algorithms consume
//! - `algos`: Dijkstra, Bellman-Ford, BFS and DFS
//! - `metrics`: density, ego networks and group summaries
//! - `types`: result types shared by callers

pub mod algos;
pub mod metrics;
pub mod provider;
pub mod types;
pub mod weighted;

pub use algos::{
    all_shortest_paths, bellman_ford, bellman_ford_path, bellman_ford_path_length,
    bellman_ford_route, bfs_traverse, dfs_traverse, dijkstra, dijkstra_path, dijkstra_path_length,
};
pub use provider::GraphProvider;
pub use types::{
    BellmanFordResult, PathAlgorithm, PathOutcome, TraversalResult, TraversalStrategy,
    DEFAULT_MAX_CYCLES,
};
pub use weighted::{Edge, NodeId, WeightedGraph};
