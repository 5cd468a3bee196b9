//! Adjacency-list graph with real-valued edge weights
//!
//! Node names are interned into dense [`NodeId`]s on first sight; out-edges
//! are kept per node in insertion order so every algorithm walks them the
//! same way on every run.

use std::collections::HashMap;

/// Dense index of a node inside one [`WeightedGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A stored out-edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub to: NodeId,
    pub weight: f64,
}

/// Weighted graph, directed or undirected (fixed at construction).
///
/// Undirected graphs store every edge in both directions with the same
/// weight. Inserting an edge that already exists keeps the smaller weight.
#[derive(Debug, Clone, Default)]
pub struct WeightedGraph {
    directed: bool,
    names: Vec<String>,
    ids: HashMap<String, NodeId>,
    adjacency: Vec<Vec<Edge>>,
    /// Position of (from, to) inside `adjacency[from]`
    slots: HashMap<(NodeId, NodeId), usize>,
}

impl WeightedGraph {
    /// Create an empty undirected graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty directed graph
    pub fn directed() -> Self {
        Self {
            directed: true,
            ..Self::default()
        }
    }

    pub fn with_direction(directed: bool) -> Self {
        if directed {
            Self::directed()
        } else {
            Self::new()
        }
    }

    /// Build an undirected graph from `(from, to, weight)` triples
    pub fn from_edges<'a, I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str, f64)>,
    {
        let mut graph = Self::new();
        graph.extend_edges(edges);
        graph
    }

    /// Build a directed graph from `(from, to, weight)` triples
    pub fn directed_from_edges<'a, I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str, f64)>,
    {
        let mut graph = Self::directed();
        graph.extend_edges(edges);
        graph
    }

    fn extend_edges<'a, I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str, f64)>,
    {
        for (from, to, weight) in edges {
            self.add_edge(from, to, weight);
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Ensure a node exists; idempotent
    pub fn add_node(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = NodeId(self.names.len());
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        self.adjacency.push(Vec::new());
        id
    }

    /// Insert `from -> to`, mirrored when undirected
    pub fn add_edge(&mut self, from: &str, to: &str, weight: f64) {
        let from_id = self.add_node(from);
        let to_id = self.add_node(to);
        self.insert_arc(from_id, to_id, weight);
        if !self.directed && from_id != to_id {
            self.insert_arc(to_id, from_id, weight);
        }
    }

    fn insert_arc(&mut self, from: NodeId, to: NodeId, weight: f64) {
        match self.slots.get(&(from, to)) {
            Some(&slot) => {
                let edge = &mut self.adjacency[from.0][slot];
                if weight < edge.weight {
                    edge.weight = weight;
                }
            }
            None => {
                let list = &mut self.adjacency[from.0];
                self.slots.insert((from, to), list.len());
                list.push(Edge { to, weight });
            }
        }
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.ids.get(name).copied()
    }

    /// Id at a dense index, if the graph has that many nodes
    pub fn node_id_at(&self, index: usize) -> Option<NodeId> {
        (index < self.names.len()).then_some(NodeId(index))
    }

    /// Name of an id handed out by this graph
    pub fn name(&self, id: NodeId) -> &str {
        &self.names[id.0]
    }

    pub fn has_node(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    /// Number of nodes
    pub fn order(&self) -> usize {
        self.names.len()
    }

    /// Number of edges; a mirrored undirected pair counts once
    pub fn size(&self) -> usize {
        let arcs: usize = self.adjacency.iter().map(Vec::len).sum();
        if self.directed {
            arcs
        } else {
            let loops = self.slots.keys().filter(|(from, to)| from == to).count();
            (arcs - loops) / 2 + loops
        }
    }

    /// Out-degree, 0 for an absent node
    pub fn degree(&self, name: &str) -> usize {
        self.node_id(name)
            .map_or(0, |id| self.adjacency[id.0].len())
    }

    /// Out-edges of `id` in insertion order
    pub fn edges_of(&self, id: NodeId) -> &[Edge] {
        &self.adjacency[id.0]
    }

    /// Out-edges of a node by name; empty when the node is absent
    pub fn neighbors<'a>(&'a self, name: &str) -> impl Iterator<Item = (&'a str, f64)> + 'a {
        let edges: &'a [Edge] = match self.node_id(name) {
            Some(id) => &self.adjacency[id.0],
            None => &[],
        };
        edges
            .iter()
            .map(move |edge| (self.names[edge.to.0].as_str(), edge.weight))
    }

    /// Stored weight of `from -> to`, if present
    pub fn weight(&self, from: &str, to: &str) -> Option<f64> {
        let from_id = self.node_id(from)?;
        let to_id = self.node_id(to)?;
        self.slots
            .get(&(from_id, to_id))
            .map(|&slot| self.adjacency[from_id.0][slot].weight)
    }

    /// Node names in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.names.len()).map(NodeId)
    }

    /// Every edge as `(from, to, weight)`; undirected pairs are yielded once
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(move |(from, list)| {
                list.iter().filter_map(move |edge| {
                    if !self.directed && edge.to.0 < from {
                        return None;
                    }
                    Some((
                        self.names[from].as_str(),
                        self.names[edge.to.0].as_str(),
                        edge.weight,
                    ))
                })
            })
    }

    /// First stored edge with a weight below zero
    pub fn first_negative_edge(&self) -> Option<(NodeId, NodeId, f64)> {
        self.adjacency.iter().enumerate().find_map(|(from, list)| {
            list.iter()
                .find(|edge| edge.weight < 0.0)
                .map(|edge| (NodeId(from), edge.to, edge.weight))
        })
    }

    pub fn has_negative_edge(&self) -> bool {
        self.first_negative_edge().is_some()
    }
}
