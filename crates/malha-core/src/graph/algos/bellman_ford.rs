//! Queue-based Bellman-Ford (SPFA) with negative-cycle detection
//!
//! Work proceeds in rounds: a round dequeues every node that was queued when
//! it started. Without a negative cycle every distance is final after `n - 1`
//! rounds, so two independent signals flag a reachable negative cycle:
//! - a node enqueued more than `n` times
//! - more than `2n` rounds (a conservative cap, not a proof)
//!
//! There is no early exit on a stable target: past round `n` the queue is
//! only non-empty when a negative cycle is feeding it, so stopping there
//! would hand back distances that are not shortest.

use std::collections::{BTreeMap, HashSet, VecDeque};

use crate::error::{MalhaError, Result};
use crate::graph::algos::shared::{names_of, require_node};
use crate::graph::provider::GraphProvider;
use crate::graph::types::BellmanFordResult;
use crate::graph::weighted::NodeId;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Termination {
    /// Queue drained, every distance final
    Drained,
    /// `node` was enqueued more than `n` times
    RelaxLimit { node: NodeId },
    /// Round cap reached
    RoundLimit,
}

struct SpfaState {
    distance: Vec<f64>,
    predecessor: Vec<Option<NodeId>>,
    in_queue: Vec<bool>,
    enqueued: Vec<usize>,
    queue: VecDeque<NodeId>,
    last_improved: Option<NodeId>,
    rounds: usize,
}

impl SpfaState {
    fn new(node_count: usize, source: NodeId) -> Self {
        let mut state = Self {
            distance: vec![f64::INFINITY; node_count],
            predecessor: vec![None; node_count],
            in_queue: vec![false; node_count],
            enqueued: vec![0; node_count],
            queue: VecDeque::new(),
            last_improved: None,
            rounds: 0,
        };
        state.distance[source.index()] = 0.0;
        state.enqueue(source);
        state
    }

    fn enqueue(&mut self, node: NodeId) {
        self.in_queue[node.index()] = true;
        self.enqueued[node.index()] += 1;
        self.queue.push_back(node);
    }

    /// Process one round; returns the node whose relax count overflowed
    fn round(&mut self, provider: &dyn GraphProvider, limit: usize) -> Option<NodeId> {
        self.rounds += 1;
        for _ in 0..self.queue.len() {
            let Some(node) = self.queue.pop_front() else {
                break;
            };
            self.in_queue[node.index()] = false;
            let base = self.distance[node.index()];

            for edge in provider.out_edges(node) {
                let to = edge.to.index();
                let candidate = base + edge.weight;
                if candidate >= self.distance[to] {
                    continue;
                }
                self.distance[to] = candidate;
                self.predecessor[to] = Some(node);
                self.last_improved = Some(edge.to);
                if !self.in_queue[to] {
                    self.enqueue(edge.to);
                    if self.enqueued[to] > limit {
                        return Some(edge.to);
                    }
                }
            }
        }
        None
    }

    fn run(&mut self, provider: &dyn GraphProvider) -> Termination {
        let n = provider.node_count();
        let round_limit = 2 * n;

        while !self.queue.is_empty() {
            if self.rounds >= round_limit {
                return Termination::RoundLimit;
            }
            if let Some(node) = self.round(provider, n) {
                return Termination::RelaxLimit { node };
            }
        }

        Termination::Drained
    }

    /// Best-effort predecessor walk from `start`, at most `n` steps, stopping
    /// at the first repeated node. Returned source-first.
    fn evidence_path(&self, start: NodeId, n: usize) -> Vec<NodeId> {
        let mut path = vec![start];
        let mut seen: HashSet<NodeId> = HashSet::from([start]);
        let mut current = start;
        while path.len() <= n {
            let Some(pred) = self.predecessor[current.index()] else {
                break;
            };
            path.push(pred);
            if !seen.insert(pred) {
                break;
            }
            current = pred;
        }
        path.reverse();
        path
    }

    fn into_result(self, provider: &dyn GraphProvider, source: NodeId) -> BellmanFordResult {
        let mut distances = BTreeMap::new();
        let mut predecessors = BTreeMap::new();
        for (idx, &distance) in self.distance.iter().enumerate() {
            if !distance.is_finite() {
                continue;
            }
            let Some(node) = provider.node_id_at(idx) else {
                continue;
            };
            distances.insert(provider.node_name(node).to_string(), distance);
            if let Some(pred) = self.predecessor[idx] {
                predecessors.insert(
                    provider.node_name(node).to_string(),
                    provider.node_name(pred).to_string(),
                );
            }
        }

        BellmanFordResult {
            source: provider.node_name(source).to_string(),
            distances,
            predecessors,
            rounds: self.rounds,
        }
    }
}

fn negative_cycle_error(
    provider: &dyn GraphProvider,
    state: &SpfaState,
    source: NodeId,
    target: Option<NodeId>,
    termination: Termination,
) -> MalhaError {
    let n = provider.node_count();
    let reached_target = target.filter(|t| state.distance[t.index()].is_finite());
    let offending = match termination {
        Termination::RelaxLimit { node } => Some(node),
        _ => state.last_improved,
    };
    let start = reached_target.or(offending).unwrap_or(source);

    let path = names_of(provider, &state.evidence_path(start, n));
    let cost = state.distance[start.index()];
    let message = match termination {
        Termination::RelaxLimit { node } => format!(
            "negative cycle reachable from {} detected at {}",
            provider.node_name(source),
            provider.node_name(node)
        ),
        _ => format!(
            "possible negative cycle, iteration limit reached after {} rounds",
            state.rounds
        ),
    };

    tracing::warn!(
        source = provider.node_name(source),
        rounds = state.rounds,
        cost,
        "negative_cycle"
    );

    MalhaError::NegativeCycle {
        path,
        cost,
        message,
    }
}

/// Single-source distances and predecessors.
///
/// Every reachable node is settled. `target` is checked for existence and,
/// once reached, anchors the evidence path of a negative cycle. Fails with
/// `NodeNotFound` for an absent source or target and with `NegativeCycle`
/// (carrying a best-effort path and cost) when a negative cycle is reachable
/// from `source`.
#[tracing::instrument(skip(provider), fields(source = %source, target = ?target))]
pub fn bellman_ford(
    provider: &dyn GraphProvider,
    source: &str,
    target: Option<&str>,
) -> Result<BellmanFordResult> {
    let source_id = require_node(provider, source)?;
    let target_id = target.map(|t| require_node(provider, t)).transpose()?;

    let mut state = SpfaState::new(provider.node_count(), source_id);
    let termination = state.run(provider);
    tracing::debug!(rounds = state.rounds, ?termination, "bellman_ford_finished");

    match termination {
        Termination::Drained => Ok(state.into_result(provider, source_id)),
        Termination::RelaxLimit { .. } | Termination::RoundLimit => Err(negative_cycle_error(
            provider,
            &state,
            source_id,
            target_id,
            termination,
        )),
    }
}

/// Cost and path to `target`; fails with `NoPath` when it is never reached
pub fn bellman_ford_route(
    provider: &dyn GraphProvider,
    source: &str,
    target: &str,
) -> Result<(f64, Vec<String>)> {
    let result = bellman_ford(provider, source, Some(target))?;
    let distance = result
        .distance(target)
        .ok_or_else(|| MalhaError::no_path(source, target))?;
    let path = result
        .path_to(target)
        .ok_or_else(|| MalhaError::no_path(source, target))?;
    Ok((distance, path))
}

pub fn bellman_ford_path(
    provider: &dyn GraphProvider,
    source: &str,
    target: &str,
) -> Result<Vec<String>> {
    bellman_ford_route(provider, source, target).map(|(_, path)| path)
}

pub fn bellman_ford_path_length(
    provider: &dyn GraphProvider,
    source: &str,
    target: &str,
) -> Result<f64> {
    bellman_ford_route(provider, source, target).map(|(distance, _)| distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::WeightedGraph;

    fn negative_ring() -> WeightedGraph {
        WeightedGraph::directed_from_edges([
            ("s", "a", 1.0),
            ("a", "b", 1.0),
            ("b", "c", 1.0),
            ("c", "a", -5.0),
        ])
    }

    #[test]
    fn test_bellman_ford_handles_negative_edges() {
        let graph = WeightedGraph::directed_from_edges([
            ("s", "a", 4.0),
            ("s", "b", 2.0),
            ("b", "a", -1.0),
            ("a", "t", 1.0),
        ]);
        let (distance, path) = bellman_ford_route(&graph, "s", "t").unwrap();
        assert_eq!(distance, 2.0);
        assert_eq!(path, vec!["s", "b", "a", "t"]);
    }

    #[test]
    fn test_bellman_ford_full_distances() {
        let graph = WeightedGraph::directed_from_edges([
            ("s", "a", 1.0),
            ("a", "b", -2.0),
            ("s", "b", 5.0),
        ]);
        let result = bellman_ford(&graph, "s", None).unwrap();
        assert_eq!(result.distance("s"), Some(0.0));
        assert_eq!(result.distance("a"), Some(1.0));
        assert_eq!(result.distance("b"), Some(-1.0));
        assert_eq!(result.predecessors.get("b").map(String::as_str), Some("a"));
        assert!(result.rounds <= graph.order());
    }

    #[test]
    fn test_bellman_ford_detects_three_node_negative_cycle() {
        let graph = negative_ring();
        let err = bellman_ford_path(&graph, "s", "c").unwrap_err();
        match err {
            MalhaError::NegativeCycle { path, cost, .. } => {
                assert!(!path.is_empty());
                assert!(cost.is_finite());
            }
            other => panic!("expected NegativeCycle, got {other:?}"),
        }
        assert!(matches!(
            bellman_ford_path_length(&graph, "s", "a"),
            Err(MalhaError::NegativeCycle { .. })
        ));
    }

    #[test]
    fn test_bellman_ford_detects_negative_self_loop_by_relax_count() {
        let graph = WeightedGraph::directed_from_edges([("s", "a", 1.0), ("a", "a", -1.0)]);
        let err = bellman_ford(&graph, "s", None).unwrap_err();
        match err {
            MalhaError::NegativeCycle { message, path, .. } => {
                assert!(message.contains("detected at a"), "{message}");
                assert!(path.contains(&"a".to_string()));
            }
            other => panic!("expected NegativeCycle, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_cycle_off_the_target_path_still_fails() {
        // t is settled at 0 in the first round while the ring keeps improving
        let graph = WeightedGraph::directed_from_edges([
            ("s", "t", 0.0),
            ("s", "a", 1.0),
            ("a", "b", 1.0),
            ("b", "c", 1.0),
            ("c", "a", -5.0),
        ]);
        assert!(matches!(
            bellman_ford_path(&graph, "s", "t"),
            Err(MalhaError::NegativeCycle { .. })
        ));
    }

    #[test]
    fn test_negative_cycle_feeding_the_target_fails() {
        // t's direct edge looks final long before the ring drags it down
        let graph = WeightedGraph::directed_from_edges([
            ("s", "t", 0.0),
            ("s", "a", 10.0),
            ("a", "b", -1.0),
            ("b", "c", 0.0),
            ("c", "a", 0.0),
            ("c", "t", 0.0),
        ]);
        assert!(matches!(
            bellman_ford_route(&graph, "s", "t"),
            Err(MalhaError::NegativeCycle { .. })
        ));
    }

    #[test]
    fn test_long_negative_ring_hits_round_limit() {
        // Each lap takes five rounds, so no node is queued more than n times
        // before the 2n cap
        let graph = WeightedGraph::directed_from_edges([
            ("s", "r0", 0.0),
            ("r0", "r1", 1.0),
            ("r1", "r2", 1.0),
            ("r2", "r3", 1.0),
            ("r3", "r4", 1.0),
            ("r4", "r0", -5.0),
        ]);
        let err = bellman_ford(&graph, "s", None).unwrap_err();
        match err {
            MalhaError::NegativeCycle {
                path,
                cost,
                message,
            } => {
                assert_eq!(
                    message,
                    "possible negative cycle, iteration limit reached after 12 rounds"
                );
                assert_eq!(path, vec!["r1", "r2", "r3", "r4", "r0", "r1"]);
                assert_eq!(cost, -1.0);
            }
            other => panic!("expected NegativeCycle, got {other:?}"),
        }
    }

    #[test]
    fn test_bellman_ford_undirected_negative_edge_is_a_cycle() {
        let graph = WeightedGraph::from_edges([("a", "b", -1.0), ("b", "c", 2.0)]);
        assert!(matches!(
            bellman_ford(&graph, "a", Some("c")),
            Err(MalhaError::NegativeCycle { .. })
        ));
    }

    #[test]
    fn test_bellman_ford_unreachable_cycle_is_ignored() {
        let mut graph = negative_ring();
        graph.add_edge("x", "y", 2.0);
        let (distance, path) = bellman_ford_route(&graph, "x", "y").unwrap();
        assert_eq!(distance, 2.0);
        assert_eq!(path, vec!["x", "y"]);
    }

    #[test]
    fn test_bellman_ford_no_path() {
        let graph = WeightedGraph::directed_from_edges([("a", "b", 1.0), ("c", "d", 1.0)]);
        let err = bellman_ford_path(&graph, "a", "d").unwrap_err();
        assert!(matches!(err, MalhaError::NoPath { ref from, ref to } if from == "a" && to == "d"));
    }

    #[test]
    fn test_bellman_ford_missing_nodes() {
        let graph = WeightedGraph::directed_from_edges([("a", "b", 1.0)]);
        assert!(matches!(
            bellman_ford(&graph, "zzz", None),
            Err(MalhaError::NodeNotFound { ref node }) if node == "zzz"
        ));
        assert!(matches!(
            bellman_ford_path(&graph, "a", "zzz"),
            Err(MalhaError::NodeNotFound { ref node }) if node == "zzz"
        ));
    }

    #[test]
    fn test_bellman_ford_source_is_target() {
        let graph = WeightedGraph::from_edges([("a", "b", 3.0)]);
        let (distance, path) = bellman_ford_route(&graph, "a", "a").unwrap();
        assert_eq!(distance, 0.0);
        assert_eq!(path, vec!["a"]);
    }

    #[test]
    fn test_evidence_path_stops_at_repeat() {
        let graph = negative_ring();
        let ids: Vec<NodeId> = ["s", "a", "b", "c"]
            .iter()
            .map(|n| graph.node_id(n).unwrap())
            .collect();
        let mut state = SpfaState::new(graph.order(), ids[0]);
        state.predecessor[ids[1].index()] = Some(ids[3]);
        state.predecessor[ids[2].index()] = Some(ids[1]);
        state.predecessor[ids[3].index()] = Some(ids[2]);

        let walk = state.evidence_path(ids[3], graph.order());
        assert_eq!(walk, vec![ids[3], ids[1], ids[2], ids[3]]);
    }
}
