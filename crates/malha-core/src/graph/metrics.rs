//! Structural summaries: density, ego networks and per-group metrics

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::error::{MalhaError, Result};
use crate::graph::weighted::WeightedGraph;

/// Whole-graph summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphSummary {
    pub order: usize,
    pub size: usize,
    pub density: f64,
    pub directed: bool,
    pub has_negative_edge: bool,
}

/// Ego network figures for one node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EgoMetrics {
    pub node: String,
    pub degree: usize,
    pub ego_order: usize,
    pub ego_size: usize,
    pub ego_density: f64,
}

/// Induced-subgraph figures for one named group of nodes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMetrics {
    pub group: String,
    pub order: usize,
    pub size: usize,
    pub density: f64,
}

/// Nodes tied for the largest value of some per-node measure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaders<T> {
    pub value: T,
    pub nodes: Vec<String>,
}

/// Edge density; 0 for fewer than two nodes
pub fn density(order: usize, size: usize, directed: bool) -> f64 {
    if order < 2 {
        return 0.0;
    }
    let possible = (order * (order - 1)) as f64;
    if directed {
        size as f64 / possible
    } else {
        2.0 * size as f64 / possible
    }
}

pub fn summary(graph: &WeightedGraph) -> GraphSummary {
    GraphSummary {
        order: graph.order(),
        size: graph.size(),
        density: density(graph.order(), graph.size(), graph.is_directed()),
        directed: graph.is_directed(),
        has_negative_edge: graph.has_negative_edge(),
    }
}

/// Subgraph on the given nodes, keeping only edges with both ends inside.
///
/// Names absent from `graph` are ignored.
pub fn induced_subgraph<S: AsRef<str>>(graph: &WeightedGraph, nodes: &[S]) -> WeightedGraph {
    let keep: HashSet<&str> = nodes
        .iter()
        .map(|name| AsRef::<str>::as_ref(name))
        .filter(|name| graph.has_node(name))
        .collect();

    let mut subgraph = WeightedGraph::with_direction(graph.is_directed());
    for name in graph.nodes().filter(|name| keep.contains(name)) {
        subgraph.add_node(name);
    }
    for (from, to, weight) in graph.edges() {
        if keep.contains(from) && keep.contains(to) {
            subgraph.add_edge(from, to, weight);
        }
    }
    subgraph
}

/// `node` plus its out-neighbors, induced
pub fn ego_network(graph: &WeightedGraph, node: &str) -> Result<WeightedGraph> {
    if !graph.has_node(node) {
        return Err(MalhaError::node_not_found(node));
    }
    let mut members = vec![node];
    members.extend(graph.neighbors(node).map(|(name, _)| name));
    Ok(induced_subgraph(graph, &members))
}

pub fn ego_metrics(graph: &WeightedGraph, node: &str) -> Result<EgoMetrics> {
    let ego = ego_network(graph, node)?;
    Ok(EgoMetrics {
        node: node.to_string(),
        degree: graph.degree(node),
        ego_order: ego.order(),
        ego_size: ego.size(),
        ego_density: density(ego.order(), ego.size(), ego.is_directed()),
    })
}

/// Ego metrics for every node, in insertion order
pub fn all_ego_metrics(graph: &WeightedGraph) -> Vec<EgoMetrics> {
    graph
        .nodes()
        .filter_map(|node| ego_metrics(graph, node).ok())
        .collect()
}

/// Order, size and density of each group's induced subgraph, by group name
pub fn group_metrics(
    graph: &WeightedGraph,
    groups: &BTreeMap<String, Vec<String>>,
) -> Vec<GroupMetrics> {
    groups
        .iter()
        .map(|(group, members)| {
            let subgraph = induced_subgraph(graph, members);
            GroupMetrics {
                group: group.clone(),
                order: subgraph.order(),
                size: subgraph.size(),
                density: density(subgraph.order(), subgraph.size(), subgraph.is_directed()),
            }
        })
        .collect()
}

/// Every node tied for the highest out-degree
pub fn max_degree_nodes(graph: &WeightedGraph) -> Leaders<usize> {
    let value = graph.nodes().map(|node| graph.degree(node)).max().unwrap_or(0);
    let nodes = graph
        .nodes()
        .filter(|node| graph.degree(node) == value)
        .map(str::to_string)
        .collect();
    Leaders { value, nodes }
}

/// Every node tied for the densest ego network
pub fn densest_ego_nodes(graph: &WeightedGraph) -> Leaders<f64> {
    let egos = all_ego_metrics(graph);
    let value = egos
        .iter()
        .map(|ego| ego.ego_density)
        .fold(0.0_f64, f64::max);
    let nodes = egos
        .into_iter()
        .filter(|ego| ego.ego_density == value)
        .map(|ego| ego.node)
        .collect();
    Leaders { value, nodes }
}
