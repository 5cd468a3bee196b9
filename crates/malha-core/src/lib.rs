//! Malha Core Library
//!
//! Weighted graph engine for travel-cost networks: shortest paths
//! (Dijkstra, Bellman-Ford), BFS/DFS traversal with cycle detection, and the
//! loaders, metrics, configuration and logging around them.

pub mod config;
pub mod error;
pub mod graph;
pub mod io;
pub mod logging;
