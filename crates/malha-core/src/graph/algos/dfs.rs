use crate::error::Result;
use crate::graph::algos::shared::{
    build_traversal_result, require_node, CycleCollector, TraversalTree,
};
use crate::graph::provider::GraphProvider;
use crate::graph::types::TraversalResult;
use crate::graph::weighted::NodeId;

/// A node on the DFS stack and the index of its next unexplored out-edge
struct Frame {
    node: NodeId,
    cursor: usize,
}

/// Iterative depth-first traversal from `source`.
///
/// Layers group nodes by stack depth at first visit. Cycle detection,
/// deduplication and the `max_cycles` bound behave exactly as in
/// [`bfs_traverse`](crate::graph::algos::bfs::bfs_traverse).
#[tracing::instrument(skip(provider), fields(source = %source, max_cycles))]
pub fn dfs_traverse(
    provider: &dyn GraphProvider,
    source: &str,
    max_cycles: usize,
) -> Result<TraversalResult> {
    let root = require_node(provider, source)?;

    let mut tree = TraversalTree::new(provider.node_count());
    let mut cycles = CycleCollector::new(max_cycles);
    let mut stack = vec![Frame {
        node: root,
        cursor: 0,
    }];
    tree.visit(root, None, 0);

    while let Some(frame) = stack.last_mut() {
        let current = frame.node;
        let Some(edge) = provider.out_edges(current).get(frame.cursor) else {
            // Neighbors exhausted
            stack.pop();
            continue;
        };
        frame.cursor += 1;

        let neighbor = edge.to;
        if !tree.is_visited(neighbor) {
            tree.visit(neighbor, Some(current), stack.len());
            stack.push(Frame {
                node: neighbor,
                cursor: 0,
            });
        } else if !tree.is_parent(current, neighbor) {
            cycles.offer(&tree, current, neighbor);
        }
    }

    tracing::debug!(
        visited = tree.order.len(),
        cycles = cycles.len(),
        "dfs_finished"
    );
    Ok(build_traversal_result(provider, &tree, cycles))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MalhaError;
    use crate::graph::algos::bfs::bfs_traverse;
    use crate::graph::types::DEFAULT_MAX_CYCLES;
    use crate::graph::WeightedGraph;

    #[test]
    fn test_dfs_directed_ring_has_one_cycle() {
        let graph = WeightedGraph::directed_from_edges([
            ("a", "b", 1.0),
            ("b", "c", 1.0),
            ("c", "d", 1.0),
            ("d", "a", 1.0),
        ]);
        let result = dfs_traverse(&graph, "a", DEFAULT_MAX_CYCLES).unwrap();

        assert_eq!(result.order, vec!["a", "b", "c", "d"]);
        assert_eq!(result.cycles, vec![vec!["a", "b", "c", "d"]]);
    }

    #[test]
    fn test_dfs_depth_differs_from_bfs_layers() {
        let graph = WeightedGraph::from_edges([("a", "b", 1.0), ("b", "c", 1.0), ("c", "a", 1.0)]);

        let dfs = dfs_traverse(&graph, "a", DEFAULT_MAX_CYCLES).unwrap();
        assert_eq!(dfs.layers, vec![vec!["a"], vec!["b"], vec!["c"]]);
        assert_eq!(dfs.cycles, vec![vec!["a", "b", "c"]]);

        let bfs = bfs_traverse(&graph, "a", DEFAULT_MAX_CYCLES).unwrap();
        assert_eq!(bfs.layers, vec![vec!["a"], vec!["b", "c"]]);
        assert_eq!(bfs.cycles.len(), 1);
    }

    #[test]
    fn test_dfs_goes_deep_before_wide() {
        let graph = WeightedGraph::directed_from_edges([
            ("r", "a", 1.0),
            ("r", "b", 1.0),
            ("a", "c", 1.0),
            ("b", "d", 1.0),
        ]);
        let result = dfs_traverse(&graph, "r", DEFAULT_MAX_CYCLES).unwrap();

        assert_eq!(result.order, vec!["r", "a", "c", "b", "d"]);
        assert_eq!(
            result.layers,
            vec![vec!["r"], vec!["a", "b"], vec!["c", "d"]]
        );
        assert!(result.cycles.is_empty());
    }

    #[test]
    fn test_dfs_path_graph_has_no_cycles() {
        let graph = WeightedGraph::from_edges([("a", "b", 1.0), ("b", "c", 1.0), ("c", "d", 1.0)]);
        let result = dfs_traverse(&graph, "b", DEFAULT_MAX_CYCLES).unwrap();

        assert_eq!(result.order, vec!["b", "a", "c", "d"]);
        assert!(result.cycles.is_empty());
    }

    #[test]
    fn test_dfs_cycle_limit() {
        let graph = WeightedGraph::from_edges([
            ("a", "b", 1.0),
            ("a", "c", 1.0),
            ("a", "d", 1.0),
            ("b", "c", 1.0),
            ("b", "d", 1.0),
            ("c", "d", 1.0),
        ]);
        let limited = dfs_traverse(&graph, "a", 2).unwrap();
        assert_eq!(limited.cycles.len(), 2);
        assert_eq!(limited.order.len(), 4);
    }

    #[test]
    fn test_dfs_missing_source() {
        let graph = WeightedGraph::from_edges([("a", "b", 1.0)]);
        let err = dfs_traverse(&graph, "zz", DEFAULT_MAX_CYCLES).unwrap_err();
        assert!(matches!(err, MalhaError::NodeNotFound { ref node } if node == "zz"));
    }

    #[test]
    fn test_dfs_is_deterministic() {
        let graph = WeightedGraph::from_edges([
            ("a", "b", 1.0),
            ("b", "c", 1.0),
            ("c", "a", 1.0),
            ("c", "d", 1.0),
            ("d", "b", 1.0),
        ]);
        let first = dfs_traverse(&graph, "a", DEFAULT_MAX_CYCLES).unwrap();
        let second = dfs_traverse(&graph, "a", DEFAULT_MAX_CYCLES).unwrap();
        assert_eq!(first, second);
    }
}
