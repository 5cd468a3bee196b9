use crate::error::Result;
use crate::graph::algos::shared::{
    build_traversal_result, require_node, CycleCollector, TraversalTree,
};
use crate::graph::provider::GraphProvider;
use crate::graph::types::TraversalResult;
use std::collections::VecDeque;

/// Breadth-first traversal from `source` with layering and cycle detection.
///
/// Layers are edge distances from the source. Every edge to an already
/// visited node other than the current node's tree parent closes a cycle,
/// spliced at the lowest common ancestor; at most `max_cycles` distinct
/// cycles are kept while the traversal itself always runs to completion.
#[tracing::instrument(skip(provider), fields(source = %source, max_cycles))]
pub fn bfs_traverse(
    provider: &dyn GraphProvider,
    source: &str,
    max_cycles: usize,
) -> Result<TraversalResult> {
    let root = require_node(provider, source)?;

    let mut tree = TraversalTree::new(provider.node_count());
    let mut cycles = CycleCollector::new(max_cycles);
    let mut queue = VecDeque::new();

    tree.visit(root, None, 0);
    queue.push_back((root, 0usize));

    // Main BFS loop
    while let Some((current, level)) = queue.pop_front() {
        for edge in provider.out_edges(current) {
            let neighbor = edge.to;
            if !tree.is_visited(neighbor) {
                tree.visit(neighbor, Some(current), level + 1);
                queue.push_back((neighbor, level + 1));
            } else if !tree.is_parent(current, neighbor) {
                cycles.offer(&tree, current, neighbor);
            }
        }
    }

    tracing::debug!(
        visited = tree.order.len(),
        cycles = cycles.len(),
        "bfs_finished"
    );
    Ok(build_traversal_result(provider, &tree, cycles))
}
