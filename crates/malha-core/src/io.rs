//! CSV loaders for edge lists, origin/destination queries and node groups
//!
//! Every file needs a header row; column names come from [`ColumnsConfig`].

mod names;

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use serde::Serialize;

use crate::config::{ColumnsConfig, GraphConfig};
use crate::error::{MalhaError, Result};
use crate::graph::WeightedGraph;
use crate::trace_time;

pub use names::{normalize_name, slug_name};

/// What happened while loading an edge list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    /// Data rows read, excluding the header
    pub rows: usize,
    /// Rows dropped for an empty endpoint or a non-finite weight
    pub skipped_rows: usize,
    pub negative_edges: usize,
    pub self_loops: usize,
}

/// One origin/destination pair, names as written in the file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Query {
    pub origin: String,
    pub destination: String,
}

fn open_reader(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| MalhaError::io_operation("open", path.display(), e))
}

/// Position of each requested header, or `MissingColumn` for the first absent one
fn column_indices<const N: usize>(
    headers: &csv::StringRecord,
    names: [&str; N],
    path: &Path,
) -> Result<[usize; N]> {
    let mut indices = [0; N];
    for (slot, name) in indices.iter_mut().zip(names) {
        *slot = headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| MalhaError::MissingColumn {
                column: name.to_string(),
                path: path.to_path_buf(),
            })?;
    }
    Ok(indices)
}

fn clean_name(raw: &str, normalize: bool) -> String {
    if normalize {
        normalize_name(raw)
    } else {
        raw.trim().to_string()
    }
}

/// Build a graph from an edge list CSV.
///
/// Rows with an empty endpoint or a weight that is not a finite number are
/// skipped and counted; negative weights are kept and counted.
#[tracing::instrument(skip(columns, options), fields(path = %path.display()))]
pub fn load_edges(
    path: &Path,
    columns: &ColumnsConfig,
    options: &GraphConfig,
) -> Result<(WeightedGraph, LoadStats)> {
    let start = Instant::now();
    let mut reader = open_reader(path)?;
    let headers = reader.headers()?.clone();
    let [from_col, to_col, weight_col] = column_indices(
        &headers,
        [columns.from.as_str(), columns.to.as_str(), columns.weight.as_str()],
        path,
    )?;

    let mut graph = WeightedGraph::with_direction(options.directed);
    let mut stats = LoadStats::default();

    for record in reader.records() {
        let record = record?;
        stats.rows += 1;

        let from = clean_name(record.get(from_col).unwrap_or_default(), options.normalize_names);
        let to = clean_name(record.get(to_col).unwrap_or_default(), options.normalize_names);
        let weight = record
            .get(weight_col)
            .and_then(|raw| raw.parse::<f64>().ok())
            .filter(|weight| weight.is_finite());

        let Some(weight) = weight.filter(|_| !from.is_empty() && !to.is_empty()) else {
            tracing::warn!(row = stats.rows, "skipping malformed edge row");
            stats.skipped_rows += 1;
            continue;
        };

        if weight < 0.0 {
            stats.negative_edges += 1;
        }
        if from == to {
            stats.self_loops += 1;
        }
        graph.add_edge(&from, &to, weight);
    }

    trace_time!(start, "load_edges", rows = stats.rows);
    tracing::debug!(
        order = graph.order(),
        size = graph.size(),
        skipped = stats.skipped_rows,
        "edges_loaded"
    );
    Ok((graph, stats))
}

/// Read origin/destination pairs; rows missing either side are dropped
#[tracing::instrument(skip(columns), fields(path = %path.display()))]
pub fn load_queries(path: &Path, columns: &ColumnsConfig) -> Result<Vec<Query>> {
    let mut reader = open_reader(path)?;
    let headers = reader.headers()?.clone();
    let [origin_col, destination_col] =
        column_indices(
            &headers,
            [columns.origin.as_str(), columns.destination.as_str()],
            path,
        )?;

    let mut queries = Vec::new();
    for record in reader.records() {
        let record = record?;
        let origin = record.get(origin_col).unwrap_or_default();
        let destination = record.get(destination_col).unwrap_or_default();
        if origin.is_empty() || destination.is_empty() {
            tracing::warn!(origin, destination, "skipping incomplete query row");
            continue;
        }
        queries.push(Query {
            origin: origin.to_string(),
            destination: destination.to_string(),
        });
    }
    Ok(queries)
}

/// Read `node,group` rows into group name -> member nodes
pub fn load_groups(
    path: &Path,
    columns: &ColumnsConfig,
    normalize: bool,
) -> Result<BTreeMap<String, Vec<String>>> {
    let mut reader = open_reader(path)?;
    let headers = reader.headers()?.clone();
    let [node_col, group_col] = column_indices(
        &headers,
        [columns.node.as_str(), columns.group.as_str()],
        path,
    )?;

    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for record in reader.records() {
        let record = record?;
        let node = clean_name(record.get(node_col).unwrap_or_default(), normalize);
        let group = record.get(group_col).unwrap_or_default();
        if node.is_empty() || group.is_empty() {
            continue;
        }
        groups.entry(group.to_string()).or_default().push(node);
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_edges_normalizes_and_counts() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            "edges.csv",
            "from,to,weight\n\
             Boa Viagem,Pina,2\n\
             Pina, Recife ,3.5\n\
             Recife,Várzea,abc\n\
             ,Pina,1\n\
             Várzea,Recife,-1\n\
             Pina,Pina,0\n",
        );

        let (graph, stats) =
            load_edges(&path, &ColumnsConfig::default(), &GraphConfig::default()).unwrap();

        assert_eq!(stats.rows, 6);
        assert_eq!(stats.skipped_rows, 2);
        assert_eq!(stats.negative_edges, 1);
        assert_eq!(stats.self_loops, 1);
        assert_eq!(graph.weight("pina", "recife"), Some(3.5));
        assert_eq!(graph.weight("recife", "boa viagem"), None);
        assert_eq!(graph.weight("recife", "varzea"), Some(-1.0));
        assert!(graph.has_negative_edge());
        assert!(!graph.is_directed());
    }

    #[test]
    fn test_load_edges_custom_columns_directed_raw_names() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            "edges.csv",
            "bairro_origem,bairro_destino,peso\nBoa Viagem,Pina,2\n",
        );
        let columns = ColumnsConfig {
            from: "bairro_origem".to_string(),
            to: "bairro_destino".to_string(),
            weight: "peso".to_string(),
            ..ColumnsConfig::default()
        };
        let options = GraphConfig {
            directed: true,
            normalize_names: false,
        };

        let (graph, _) = load_edges(&path, &columns, &options).unwrap();
        assert_eq!(graph.weight("Boa Viagem", "Pina"), Some(2.0));
        assert_eq!(graph.weight("Pina", "Boa Viagem"), None);
    }

    #[test]
    fn test_load_edges_missing_column() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "edges.csv", "from,to,cost\na,b,1\n");
        let err = load_edges(&path, &ColumnsConfig::default(), &GraphConfig::default()).unwrap_err();
        assert!(matches!(err, MalhaError::MissingColumn { ref column, .. } if column == "weight"));
    }

    #[test]
    fn test_load_edges_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_edges(
            &dir.path().join("absent.csv"),
            &ColumnsConfig::default(),
            &GraphConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, MalhaError::FailedOperationWithTarget { .. }));
    }

    #[test]
    fn test_load_queries_keeps_raw_names() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            "queries.csv",
            "origin,destination\nNova Descoberta,Setúbal\nPina,\n",
        );
        let queries = load_queries(&path, &ColumnsConfig::default()).unwrap();
        assert_eq!(
            queries,
            vec![Query {
                origin: "Nova Descoberta".to_string(),
                destination: "Setúbal".to_string(),
            }]
        );
    }

    #[test]
    fn test_load_groups() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            "groups.csv",
            "node,group\nBoa Viagem,RPA6\nPina,RPA6\nRecife,RPA1\n",
        );
        let groups = load_groups(&path, &ColumnsConfig::default(), true).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["RPA6"], vec!["boa viagem", "pina"]);
        assert_eq!(groups["RPA1"], vec!["recife"]);
    }
}
