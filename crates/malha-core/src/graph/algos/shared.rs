use std::collections::HashSet;

use crate::error::{MalhaError, Result};
use crate::graph::provider::GraphProvider;
use crate::graph::types::TraversalResult;
use crate::graph::weighted::NodeId;

/// Resolve a node name or fail with `NodeNotFound`
pub fn require_node(provider: &dyn GraphProvider, name: &str) -> Result<NodeId> {
    provider
        .node_id(name)
        .ok_or_else(|| MalhaError::node_not_found(name))
}

/// Map ids back to owned names
pub fn names_of(provider: &dyn GraphProvider, ids: &[NodeId]) -> Vec<String> {
    ids.iter()
        .map(|&id| provider.node_name(id).to_string())
        .collect()
}

/// Per-node traversal bookkeeping shared by BFS and DFS
pub struct TraversalTree {
    pub parent: Vec<Option<NodeId>>,
    pub level: Vec<Option<usize>>,
    pub order: Vec<NodeId>,
}

impl TraversalTree {
    pub fn new(node_count: usize) -> Self {
        Self {
            parent: vec![None; node_count],
            level: vec![None; node_count],
            order: Vec::new(),
        }
    }

    pub fn is_visited(&self, id: NodeId) -> bool {
        self.level[id.index()].is_some()
    }

    pub fn visit(&mut self, id: NodeId, parent: Option<NodeId>, level: usize) {
        self.parent[id.index()] = parent;
        self.level[id.index()] = Some(level);
        self.order.push(id);
    }

    /// Whether `candidate` is the tree parent of `node`
    pub fn is_parent(&self, node: NodeId, candidate: NodeId) -> bool {
        self.parent[node.index()] == Some(candidate)
    }

    /// `node`, its parent, ..., the root
    fn root_path(&self, node: NodeId) -> Vec<NodeId> {
        let mut path = vec![node];
        let mut current = node;
        while let Some(parent) = self.parent[current.index()] {
            path.push(parent);
            current = parent;
        }
        path
    }

    /// Splice the closed walk formed by the non-tree edge `from -> to`.
    ///
    /// The walk starts at the lowest common ancestor, runs down the tree to
    /// `from`, crosses to `to`, and climbs back up to just below the ancestor.
    pub fn splice_cycle(&self, from: NodeId, to: NodeId) -> Option<Vec<NodeId>> {
        let from_path = self.root_path(from);
        let to_path = self.root_path(to);
        let on_to_path: HashSet<NodeId> = to_path.iter().copied().collect();

        let from_idx = from_path.iter().position(|id| on_to_path.contains(id))?;
        let ancestor = from_path[from_idx];
        let to_idx = to_path.iter().position(|&id| id == ancestor)?;

        let mut cycle: Vec<NodeId> = from_path[..=from_idx].iter().rev().copied().collect();
        cycle.extend_from_slice(&to_path[..to_idx]);
        Some(cycle)
    }

    /// Group visited nodes by level, in visitation order
    pub fn layers(&self) -> Vec<Vec<NodeId>> {
        let mut layers: Vec<Vec<NodeId>> = Vec::new();
        for &id in &self.order {
            let Some(level) = self.level[id.index()] else {
                continue;
            };
            if layers.len() <= level {
                layers.resize_with(level + 1, Vec::new);
            }
            layers[level].push(id);
        }
        layers
    }
}

/// Rotate to start at the smallest id and pick the direction whose second
/// element is smaller, so a cycle and its reversal compare equal.
pub fn canonical_cycle(cycle: &[NodeId]) -> Vec<NodeId> {
    let Some((start, _)) = cycle.iter().enumerate().min_by_key(|&(_, id)| *id) else {
        return Vec::new();
    };
    let n = cycle.len();
    let forward: Vec<NodeId> = (0..n).map(|i| cycle[(start + i) % n]).collect();
    let backward: Vec<NodeId> = (0..n).map(|i| cycle[(start + n - i) % n]).collect();
    forward.min(backward)
}

/// Deduplicating, bounded cycle sink
pub struct CycleCollector {
    max_cycles: usize,
    seen: HashSet<Vec<NodeId>>,
    cycles: Vec<Vec<NodeId>>,
}

impl CycleCollector {
    pub fn new(max_cycles: usize) -> Self {
        Self {
            max_cycles,
            seen: HashSet::new(),
            cycles: Vec::new(),
        }
    }

    pub fn is_full(&self) -> bool {
        self.cycles.len() >= self.max_cycles
    }

    /// Record the cycle closed by the non-tree edge `from -> to`, if any
    pub fn offer(&mut self, tree: &TraversalTree, from: NodeId, to: NodeId) {
        if self.is_full() {
            return;
        }
        let Some(cycle) = tree.splice_cycle(from, to) else {
            return;
        };
        if cycle.len() < 3 {
            return;
        }
        if self.seen.insert(canonical_cycle(&cycle)) {
            self.cycles.push(cycle);
        }
    }

    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }

    pub fn into_cycles(self) -> Vec<Vec<NodeId>> {
        self.cycles
    }
}

/// Build the name-based result for a finished traversal
pub fn build_traversal_result(
    provider: &dyn GraphProvider,
    tree: &TraversalTree,
    cycles: CycleCollector,
) -> TraversalResult {
    TraversalResult {
        order: names_of(provider, &tree.order),
        layers: tree
            .layers()
            .iter()
            .map(|layer| names_of(provider, layer))
            .collect(),
        cycles: cycles
            .into_cycles()
            .iter()
            .map(|cycle| names_of(provider, cycle))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::WeightedGraph;

    fn ids(graph: &WeightedGraph, names: &[&str]) -> Vec<NodeId> {
        names.iter().map(|n| graph.node_id(n).unwrap()).collect()
    }

    #[test]
    fn test_canonical_cycle_ignores_rotation_and_direction() {
        let graph = WeightedGraph::from_edges([("a", "b", 1.0), ("c", "d", 1.0)]);
        let forward = ids(&graph, &["b", "c", "d", "a"]);
        let backward = ids(&graph, &["a", "d", "c", "b"]);
        assert_eq!(canonical_cycle(&forward), canonical_cycle(&backward));
        assert_eq!(canonical_cycle(&forward), ids(&graph, &["a", "b", "c", "d"]));
    }

    #[test]
    fn test_splice_cycle_through_common_ancestor() {
        let graph = WeightedGraph::from_edges([
            ("r", "a", 1.0),
            ("r", "b", 1.0),
            ("a", "c", 1.0),
            ("b", "d", 1.0),
        ]);
        let [r, a, b, c, d]: [NodeId; 5] = ids(&graph, &["r", "a", "b", "c", "d"]).try_into().unwrap();
        let mut tree = TraversalTree::new(graph.order());
        tree.visit(r, None, 0);
        tree.visit(a, Some(r), 1);
        tree.visit(b, Some(r), 1);
        tree.visit(c, Some(a), 2);
        tree.visit(d, Some(b), 2);

        assert_eq!(tree.splice_cycle(c, d).unwrap(), vec![r, a, c, d, b]);
        assert_eq!(tree.layers(), vec![vec![r], vec![a, b], vec![c, d]]);
    }

    #[test]
    fn test_collector_drops_short_walks_and_duplicates() {
        let graph = WeightedGraph::from_edges([("a", "b", 1.0), ("b", "c", 1.0)]);
        let [a, b, c]: [NodeId; 3] = ids(&graph, &["a", "b", "c"]).try_into().unwrap();
        let mut tree = TraversalTree::new(graph.order());
        tree.visit(a, None, 0);
        tree.visit(b, Some(a), 1);
        tree.visit(c, Some(b), 2);

        let mut collector = CycleCollector::new(10);
        collector.offer(&tree, b, a);
        assert!(collector.is_empty());

        collector.offer(&tree, c, a);
        collector.offer(&tree, c, a);
        assert_eq!(collector.len(), 1);
    }

    #[test]
    fn test_collector_respects_limit() {
        let graph = WeightedGraph::from_edges([("a", "b", 1.0), ("b", "c", 1.0), ("c", "d", 1.0)]);
        let [a, b, c, d]: [NodeId; 4] = ids(&graph, &["a", "b", "c", "d"]).try_into().unwrap();
        let mut tree = TraversalTree::new(graph.order());
        tree.visit(a, None, 0);
        tree.visit(b, Some(a), 1);
        tree.visit(c, Some(b), 2);
        tree.visit(d, Some(c), 3);

        let mut collector = CycleCollector::new(1);
        collector.offer(&tree, c, a);
        collector.offer(&tree, d, a);
        assert_eq!(collector.len(), 1);
        assert!(collector.is_full());
    }
}
