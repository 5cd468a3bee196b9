//! Graph algorithm implementations
//!
//! Contains concrete implementations of graph algorithms:
//! - `dijkstra`: Weighted shortest paths over non-negative weights
//! - `bellman_ford`: Shortest paths with negative weights and cycle detection
//! - `bfs`: Breadth-first traversal with layers and cycles
//! - `dfs`: Depth-first traversal with depths and cycles
//! - `shared`: Common utilities used by multiple algorithms

pub mod bellman_ford;
pub mod bfs;
pub mod dfs;
pub mod dijkstra;
pub mod shared;

pub use bellman_ford::{
    bellman_ford, bellman_ford_path, bellman_ford_path_length, bellman_ford_route,
};
pub use bfs::bfs_traverse;
pub use dfs::dfs_traverse;
pub use dijkstra::{all_shortest_paths, dijkstra, dijkstra_path, dijkstra_path_length};
