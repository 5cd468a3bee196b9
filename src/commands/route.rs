//! Query routing: aliases, mandatory intermediates, algorithm choice

use serde::Serialize;

use malha_core::config::MalhaConfig;
use malha_core::error::{MalhaError, Result};
use malha_core::graph::{bellman_ford_route, dijkstra, PathAlgorithm, PathOutcome, WeightedGraph};

/// A query after name normalization and alias resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub origin: String,
    pub destination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub via: Option<String>,
}

impl Route {
    /// Resolve a query against the routing rules.
    ///
    /// `via` rules match the normalized names before aliasing; an explicit
    /// `via` wins over any rule.
    pub fn resolve(
        config: &MalhaConfig,
        origin: &str,
        destination: &str,
        via: Option<&str>,
    ) -> Self {
        let via = via
            .map(str::to_string)
            .or_else(|| config.via_for(origin, destination).map(str::to_string));
        Self {
            origin: config.resolve_alias(origin).to_string(),
            destination: config.resolve_alias(destination).to_string(),
            via,
        }
    }

    /// Run the query; unreachable is an outcome, everything else an error
    pub fn evaluate(&self, graph: &WeightedGraph, algorithm: PathAlgorithm) -> Result<PathOutcome> {
        let Some(via) = &self.via else {
            return shortest_path(graph, algorithm, &self.origin, &self.destination);
        };
        if !graph.has_node(via) {
            return Err(MalhaError::node_not_found(via));
        }

        let first = shortest_path(graph, algorithm, &self.origin, via)?;
        let second = shortest_path(graph, algorithm, via, &self.destination)?;
        Ok(join_legs(first, second))
    }
}

/// Single-leg shortest path with the chosen algorithm
pub fn shortest_path(
    graph: &WeightedGraph,
    algorithm: PathAlgorithm,
    from: &str,
    to: &str,
) -> Result<PathOutcome> {
    match algorithm {
        PathAlgorithm::Dijkstra => dijkstra(graph, from, to),
        PathAlgorithm::BellmanFord => match bellman_ford_route(graph, from, to) {
            Ok((distance, path)) => Ok(PathOutcome::Found { distance, path }),
            Err(MalhaError::NoPath { .. }) => Ok(PathOutcome::Unreachable),
            Err(e) => Err(e),
        },
    }
}

/// Concatenate two legs sharing the intermediate node, without repeating it
fn join_legs(first: PathOutcome, second: PathOutcome) -> PathOutcome {
    match (first, second) {
        (
            PathOutcome::Found {
                distance: first_cost,
                path: mut path,
            },
            PathOutcome::Found {
                distance: second_cost,
                path: rest,
            },
        ) => {
            path.extend(rest.into_iter().skip(1));
            PathOutcome::Found {
                distance: first_cost + second_cost,
                path,
            }
        }
        _ => PathOutcome::Unreachable,
    }
}
