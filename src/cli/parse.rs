use malha_core::graph::{PathAlgorithm, TraversalStrategy};

/// Parse a shortest path algorithm name
pub fn parse_algorithm(s: &str) -> std::result::Result<PathAlgorithm, String> {
    s.parse::<PathAlgorithm>().map_err(|e| e.to_string())
}

/// Parse a traversal strategy name
pub fn parse_strategy(s: &str) -> std::result::Result<TraversalStrategy, String> {
    s.parse::<TraversalStrategy>().map_err(|e| e.to_string())
}

/// Parse a strictly positive count
pub fn parse_positive(s: &str) -> std::result::Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_algorithm() {
        assert_eq!(parse_algorithm("bf").unwrap(), PathAlgorithm::BellmanFord);
        assert_eq!(parse_algorithm("Dijkstra").unwrap(), PathAlgorithm::Dijkstra);
        assert!(parse_algorithm("astar").is_err());
    }

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive("3").unwrap(), 3);
        assert!(parse_positive("0").is_err());
        assert!(parse_positive("-1").is_err());
    }
}
