use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MalhaError;

/// Default bound on recorded cycles per traversal
pub const DEFAULT_MAX_CYCLES: usize = 10;

/// Outcome of a single-pair shortest path query.
///
/// Unreachability is an ordinary answer, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PathOutcome {
    Found { distance: f64, path: Vec<String> },
    Unreachable,
}

impl PathOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, PathOutcome::Found { .. })
    }

    /// Path cost, infinite when unreachable
    pub fn distance(&self) -> f64 {
        match self {
            PathOutcome::Found { distance, .. } => *distance,
            PathOutcome::Unreachable => f64::INFINITY,
        }
    }

    /// Node sequence from source to target, empty when unreachable
    pub fn path(&self) -> &[String] {
        match self {
            PathOutcome::Found { path, .. } => path,
            PathOutcome::Unreachable => &[],
        }
    }
}

/// Distances and single predecessors computed by Bellman-Ford.
///
/// Only reached nodes appear in `distances`; every one of them is final.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BellmanFordResult {
    pub source: String,
    pub distances: BTreeMap<String, f64>,
    pub predecessors: BTreeMap<String, String>,
    pub rounds: usize,
}

impl BellmanFordResult {
    pub fn distance(&self, node: &str) -> Option<f64> {
        self.distances.get(node).copied()
    }

    /// Walk predecessors back from `target`; `None` when it was never reached
    pub fn path_to(&self, target: &str) -> Option<Vec<String>> {
        self.distances.get(target)?;

        let mut path = vec![target.to_string()];
        let mut current = target;
        while current != self.source {
            let pred = self.predecessors.get(current)?;
            if path.len() > self.distances.len() {
                return None;
            }
            path.push(pred.clone());
            current = pred.as_str();
        }
        path.reverse();
        Some(path)
    }
}

/// Visitation order, level grouping and cycles found by a traversal.
///
/// `layers[i]` holds the nodes first reached at level `i` (edge distance for
/// BFS, stack depth for DFS) in visitation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraversalResult {
    pub order: Vec<String>,
    pub layers: Vec<Vec<String>>,
    pub cycles: Vec<Vec<String>>,
}

/// Traversal strategy selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalStrategy {
    #[default]
    Bfs,
    Dfs,
}

impl FromStr for TraversalStrategy {
    type Err = MalhaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bfs" => Ok(TraversalStrategy::Bfs),
            "dfs" => Ok(TraversalStrategy::Dfs),
            other => Err(MalhaError::invalid_value("traversal strategy", other)),
        }
    }
}

impl fmt::Display for TraversalStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraversalStrategy::Bfs => write!(f, "bfs"),
            TraversalStrategy::Dfs => write!(f, "dfs"),
        }
    }
}

/// Shortest path algorithm selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathAlgorithm {
    #[default]
    Dijkstra,
    BellmanFord,
}

impl FromStr for PathAlgorithm {
    type Err = MalhaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dijkstra" => Ok(PathAlgorithm::Dijkstra),
            "bellman-ford" | "bellman_ford" | "bf" => Ok(PathAlgorithm::BellmanFord),
            other => Err(MalhaError::invalid_value("path algorithm", other)),
        }
    }
}

impl fmt::Display for PathAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathAlgorithm::Dijkstra => write!(f, "dijkstra"),
            PathAlgorithm::BellmanFord => write!(f, "bellman-ford"),
        }
    }
}
