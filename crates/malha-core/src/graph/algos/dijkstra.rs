use crate::error::{MalhaError, Result};
use crate::graph::algos::shared::{names_of, require_node};
use crate::graph::provider::GraphProvider;
use crate::graph::types::PathOutcome;
use crate::graph::weighted::NodeId;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Wrapper for BinaryHeap to use as min-heap (ordered by accumulated cost,
/// then by push order so equal costs pop first-come first-served)
#[derive(Debug, Clone)]
pub struct HeapEntry {
    pub node: NodeId,
    pub accumulated_cost: f64,
    pub seq: u64,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.accumulated_cost
            .total_cmp(&other.accumulated_cost)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Finalized distances and tie-aware predecessors of one Dijkstra run
struct DijkstraState {
    finalized: Vec<Option<f64>>,
    best: Vec<Option<f64>>,
    /// Every predecessor achieving the best distance, first-found first
    predecessors: Vec<Vec<NodeId>>,
    heap: BinaryHeap<Reverse<HeapEntry>>,
    next_seq: u64,
}

impl DijkstraState {
    fn new(node_count: usize) -> Self {
        Self {
            finalized: vec![None; node_count],
            best: vec![None; node_count],
            predecessors: vec![Vec::new(); node_count],
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    fn push(&mut self, node: NodeId, accumulated_cost: f64) {
        self.heap.push(Reverse(HeapEntry {
            node,
            accumulated_cost,
            seq: self.next_seq,
        }));
        self.next_seq += 1;
    }

    fn relax(&mut self, from: NodeId, to: NodeId, candidate: f64) {
        let slot = to.index();
        match self.best[slot] {
            Some(best) if candidate > best => {}
            Some(best) if candidate == best => self.predecessors[slot].push(from),
            _ => {
                self.best[slot] = Some(candidate);
                self.predecessors[slot].clear();
                self.predecessors[slot].push(from);
                self.push(to, candidate);
            }
        }
    }

    /// First-found predecessor chain from `source` to `target`
    fn first_path(&self, source: NodeId, target: NodeId) -> Vec<NodeId> {
        let mut path = vec![target];
        let mut current = target;
        while current != source {
            match self.predecessors[current.index()].first() {
                Some(&pred) => {
                    path.push(pred);
                    current = pred;
                }
                None => break,
            }
        }
        path.reverse();
        path
    }
}

/// Fail with `InvalidWeight` when any stored edge is negative
fn check_non_negative(provider: &dyn GraphProvider) -> Result<()> {
    match provider.first_negative_edge() {
        Some((from, to, weight)) => Err(MalhaError::InvalidWeight {
            from: provider.node_name(from).to_string(),
            to: provider.node_name(to).to_string(),
            weight,
        }),
        None => Ok(()),
    }
}

fn run(provider: &dyn GraphProvider, source: NodeId, target: NodeId) -> DijkstraState {
    let mut state = DijkstraState::new(provider.node_count());
    state.best[source.index()] = Some(0.0);
    state.push(source, 0.0);

    let mut settled = 0usize;
    while let Some(Reverse(HeapEntry {
        node,
        accumulated_cost,
        ..
    })) = state.heap.pop()
    {
        // Stale entry for a node already settled at a lower cost
        if state.finalized[node.index()].is_some() {
            continue;
        }
        state.finalized[node.index()] = Some(accumulated_cost);
        settled += 1;

        if node == target {
            break;
        }

        for edge in provider.out_edges(node) {
            if state.finalized[edge.to.index()].is_some() {
                continue;
            }
            state.relax(node, edge.to, accumulated_cost + edge.weight);
        }
    }

    tracing::debug!(settled, "dijkstra_finished");
    state
}

/// Shortest path from `source` to `target` on a graph with non-negative weights.
///
/// Fails with `NodeNotFound` for an absent endpoint and with `InvalidWeight`
/// before any relaxation if the graph holds a negative edge. An unreachable
/// target yields [`PathOutcome::Unreachable`].
#[tracing::instrument(skip(provider), fields(source = %source, target = %target))]
pub fn dijkstra(provider: &dyn GraphProvider, source: &str, target: &str) -> Result<PathOutcome> {
    let source_id = require_node(provider, source)?;
    let target_id = require_node(provider, target)?;
    check_non_negative(provider)?;

    let state = run(provider, source_id, target_id);
    match state.finalized[target_id.index()] {
        Some(distance) => Ok(PathOutcome::Found {
            distance,
            path: names_of(provider, &state.first_path(source_id, target_id)),
        }),
        None => Ok(PathOutcome::Unreachable),
    }
}

/// Path nodes only; fails with `NoPath` when unreachable
pub fn dijkstra_path(
    provider: &dyn GraphProvider,
    source: &str,
    target: &str,
) -> Result<Vec<String>> {
    match dijkstra(provider, source, target)? {
        PathOutcome::Found { path, .. } => Ok(path),
        PathOutcome::Unreachable => Err(MalhaError::no_path(source, target)),
    }
}

/// Path cost only; fails with `NoPath` when unreachable
pub fn dijkstra_path_length(
    provider: &dyn GraphProvider,
    source: &str,
    target: &str,
) -> Result<f64> {
    match dijkstra(provider, source, target)? {
        PathOutcome::Found { distance, .. } => Ok(distance),
        PathOutcome::Unreachable => Err(MalhaError::no_path(source, target)),
    }
}

/// Every equal-cost shortest path, first-found first, at most `limit` of them.
///
/// Empty when the target is unreachable.
#[tracing::instrument(skip(provider), fields(source = %source, target = %target))]
pub fn all_shortest_paths(
    provider: &dyn GraphProvider,
    source: &str,
    target: &str,
    limit: usize,
) -> Result<Vec<Vec<String>>> {
    let source_id = require_node(provider, source)?;
    let target_id = require_node(provider, target)?;
    check_non_negative(provider)?;

    let state = run(provider, source_id, target_id);
    if state.finalized[target_id.index()].is_none() {
        return Ok(Vec::new());
    }

    // Paths are grown backwards from the target; predecessors are pushed in
    // reverse so the first-found one is expanded first.
    let mut paths = Vec::new();
    let mut stack: Vec<Vec<NodeId>> = vec![vec![target_id]];
    while let Some(partial) = stack.pop() {
        if paths.len() >= limit {
            break;
        }
        let Some(&head) = partial.last() else {
            continue;
        };
        if head == source_id {
            let mut path = partial;
            path.reverse();
            paths.push(names_of(provider, &path));
            continue;
        }
        for &pred in state.predecessors[head.index()].iter().rev() {
            let mut extended = partial.clone();
            extended.push(pred);
            stack.push(extended);
        }
    }

    Ok(paths)
}
