//! Configuration type definitions

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::graph::types::DEFAULT_MAX_CYCLES;

/// Default per-query time budget in batch runs
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MalhaConfig {
    #[serde(default)]
    pub graph: GraphConfig,

    /// CSV header names
    #[serde(default)]
    pub columns: ColumnsConfig,

    #[serde(default)]
    pub traversal: TraversalConfig,

    #[serde(default)]
    pub batch: BatchConfig,

    /// Query rewriting applied before routing
    #[serde(default)]
    pub routing: RoutingConfig,
}

/// How edge lists become a graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Build a directed graph instead of mirroring every edge
    #[serde(default)]
    pub directed: bool,

    /// Fold accents and case in node names (default true)
    #[serde(default = "default_true")]
    pub normalize_names: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            directed: false,
            normalize_names: true,
        }
    }
}

/// Header names for the edge, query and group files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnsConfig {
    pub from: String,
    pub to: String,
    pub weight: String,
    pub origin: String,
    pub destination: String,
    pub node: String,
    pub group: String,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            from: "from".to_string(),
            to: "to".to_string(),
            weight: "weight".to_string(),
            origin: "origin".to_string(),
            destination: "destination".to_string(),
            node: "node".to_string(),
            group: "group".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraversalConfig {
    /// Cap on distinct cycles recorded per traversal
    #[serde(default = "default_max_cycles")]
    pub max_cycles: usize,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            max_cycles: DEFAULT_MAX_CYCLES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Queries running longer than this are discarded as timed out
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Aliases and mandatory intermediates, keyed by normalized names
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Query endpoint rewritten to another node before lookup
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,

    /// Queries from `from` to `to` must pass through `through`
    #[serde(default)]
    pub via: Vec<ViaRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViaRule {
    pub from: String,
    pub to: String,
    pub through: String,
}

fn default_true() -> bool {
    true
}

fn default_max_cycles() -> usize {
    DEFAULT_MAX_CYCLES
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
