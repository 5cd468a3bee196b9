//! `malha batch`: many origin/destination queries, one graph
//!
//! Per-query engine failures are tallied and the run continues; anything
//! else (I/O, malformed files) aborts. Ctrl-C stops after the current query
//! and keeps what was computed so far.

use std::fs::{self, File};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::cli::commands::BatchArgs;
use crate::cli::output::{format_cost, format_path, print_json};
use crate::cli::OutputFormat;
use crate::commands::dispatch::CommandContext;
use crate::commands::route::Route;
use malha_core::error::{MalhaError, Result};
use malha_core::graph::{PathAlgorithm, PathOutcome, WeightedGraph};
use malha_core::io::{self, slug_name, Query};

/// How a single query ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryStatus {
    Success,
    NoPath,
    NegativeCycle,
    InvalidWeight,
    MissingOrigin,
    MissingDestination,
    MissingVia,
    TimedOut,
}

impl QueryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            QueryStatus::Success => "success",
            QueryStatus::NoPath => "no path",
            QueryStatus::NegativeCycle => "negative cycle",
            QueryStatus::InvalidWeight => "invalid weight",
            QueryStatus::MissingOrigin => "missing origin",
            QueryStatus::MissingDestination => "missing destination",
            QueryStatus::MissingVia => "missing via",
            QueryStatus::TimedOut => "timed out",
        }
    }
}

/// Outcome tallies for a batch run
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct BatchStats {
    pub total: usize,
    pub success: usize,
    pub no_path: usize,
    pub negative_cycle: usize,
    pub invalid_weight: usize,
    pub missing_origin: usize,
    pub missing_destination: usize,
    pub missing_via: usize,
    pub timed_out: usize,
    pub interrupted: bool,
}

impl BatchStats {
    pub fn record(&mut self, status: QueryStatus) {
        self.total += 1;
        let counter = match status {
            QueryStatus::Success => &mut self.success,
            QueryStatus::NoPath => &mut self.no_path,
            QueryStatus::NegativeCycle => &mut self.negative_cycle,
            QueryStatus::InvalidWeight => &mut self.invalid_weight,
            QueryStatus::MissingOrigin => &mut self.missing_origin,
            QueryStatus::MissingDestination => &mut self.missing_destination,
            QueryStatus::MissingVia => &mut self.missing_via,
            QueryStatus::TimedOut => &mut self.timed_out,
        };
        *counter += 1;
    }

    pub fn failed(&self) -> usize {
        self.total - self.success
    }
}

/// Walk and cost reported alongside a negative cycle. Evidence only, never a
/// shortest path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleEvidence {
    pub cost: f64,
    pub path: Vec<String>,
}

/// One evaluated query, names as written in the query file
#[derive(Debug, Clone, Serialize)]
pub struct RouteRecord {
    pub origin: String,
    pub destination: String,
    pub route: Route,
    pub status: QueryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    pub path: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<CycleEvidence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
}

impl RouteRecord {
    /// Cost and path for tabular output: the route when found, the
    /// negative-cycle evidence otherwise
    fn table_cost_and_path(&self) -> (Option<f64>, &[String]) {
        match (&self.cost, &self.evidence) {
            (Some(cost), _) => (Some(*cost), &self.path),
            (None, Some(evidence)) => (Some(evidence.cost), &evidence.path),
            (None, None) => (None, &[]),
        }
    }
}

#[derive(Debug, Serialize)]
struct BatchOutput<'a> {
    algorithm: PathAlgorithm,
    stats: &'a BatchStats,
    routes: &'a [RouteRecord],
}

/// Map a per-query engine failure onto a status
fn classify(err: &MalhaError, route: &Route) -> QueryStatus {
    match err {
        MalhaError::NodeNotFound { node } if *node == route.origin => QueryStatus::MissingOrigin,
        MalhaError::NodeNotFound { node } if *node == route.destination => {
            QueryStatus::MissingDestination
        }
        MalhaError::NodeNotFound { .. } => QueryStatus::MissingVia,
        MalhaError::NegativeCycle { .. } => QueryStatus::NegativeCycle,
        MalhaError::InvalidWeight { .. } => QueryStatus::InvalidWeight,
        _ => QueryStatus::NoPath,
    }
}

/// Evaluate one query; only non-query failures are returned as errors
fn run_query(
    ctx: &CommandContext,
    graph: &WeightedGraph,
    algorithm: PathAlgorithm,
    query: &Query,
    timeout: Duration,
) -> Result<RouteRecord> {
    let route = Route::resolve(
        &ctx.config,
        &ctx.node_name(&query.origin),
        &ctx.node_name(&query.destination),
        None,
    );
    let mut record = RouteRecord {
        origin: query.origin.clone(),
        destination: query.destination.clone(),
        route,
        status: QueryStatus::NoPath,
        cost: None,
        path: Vec::new(),
        evidence: None,
        error: None,
    };

    let started = Instant::now();
    let outcome = record.route.evaluate(graph, algorithm);
    if started.elapsed() > timeout {
        tracing::warn!(
            origin = %query.origin,
            destination = %query.destination,
            elapsed = ?started.elapsed(),
            "query timed out, result discarded"
        );
        record.status = QueryStatus::TimedOut;
        return Ok(record);
    }

    match outcome {
        Ok(PathOutcome::Found { distance, path }) => {
            record.status = QueryStatus::Success;
            record.cost = Some(distance);
            record.path = path;
        }
        Ok(PathOutcome::Unreachable) => record.status = QueryStatus::NoPath,
        Err(e) if e.is_query_failure() => {
            tracing::debug!(
                origin = %query.origin,
                destination = %query.destination,
                error = %e,
                "query_failed"
            );
            record.status = classify(&e, &record.route);
            record.error = Some(e.to_json()["error"].clone());
            if let MalhaError::NegativeCycle { path, cost, .. } = e {
                record.evidence = Some(CycleEvidence { cost, path });
            }
        }
        Err(e) => return Err(e),
    }
    Ok(record)
}

/// `routes.csv` plus one `route_<origin>_<destination>.json` per query.
///
/// Rows that are not `success` carry cost and path only as negative-cycle
/// evidence.
fn write_outputs(dir: &Path, records: &[RouteRecord]) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| MalhaError::io_operation("create", dir.display(), e))?;

    let mut writer = csv::Writer::from_path(dir.join("routes.csv"))?;
    writer.write_record(["origin", "destination", "cost", "path", "status"])?;
    for record in records {
        let (cost, path) = record.table_cost_and_path();
        let cost = cost.map(|c| c.to_string()).unwrap_or_default();
        writer.write_record([
            record.origin.as_str(),
            record.destination.as_str(),
            cost.as_str(),
            format_path(path).as_str(),
            record.status.as_str(),
        ])?;

        let name = format!(
            "route_{}_{}.json",
            slug_name(&record.origin),
            slug_name(&record.destination)
        );
        let file = File::create(dir.join(&name))
            .map_err(|e| MalhaError::io_operation("create", &name, e))?;
        serde_json::to_writer_pretty(file, record)?;
    }
    writer.flush()?;
    Ok(())
}

fn install_interrupt_flag() -> Result<Arc<AtomicBool>> {
    let flag = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&flag);
    ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst))
        .map_err(|e| MalhaError::Other(format!("failed to install Ctrl-C handler: {e}")))?;
    Ok(flag)
}

pub fn execute(ctx: &CommandContext, args: &BatchArgs) -> Result<()> {
    let (graph, _) = ctx.load_graph(&args.edges)?;
    let queries = io::load_queries(&args.queries, &ctx.config.columns)?;
    let timeout = Duration::from_secs(
        args.timeout_secs
            .map_or(ctx.config.batch.timeout_secs, |secs| secs as u64),
    );
    let interrupted = install_interrupt_flag()?;

    let mut stats = BatchStats::default();
    let mut records = Vec::with_capacity(queries.len());
    for query in &queries {
        if interrupted.load(Ordering::SeqCst) {
            tracing::warn!(done = records.len(), total = queries.len(), "batch interrupted");
            stats.interrupted = true;
            break;
        }
        let record = run_query(ctx, &graph, args.algorithm, query, timeout)?;
        stats.record(record.status);
        records.push(record);
    }
    tracing::debug!(elapsed = ?ctx.start.elapsed(), total = stats.total, "batch_finished");

    if let Some(dir) = &args.out {
        write_outputs(dir, &records)?;
    }

    match ctx.cli.format {
        OutputFormat::Json => print_json(&BatchOutput {
            algorithm: args.algorithm,
            stats: &stats,
            routes: &records,
        })?,
        OutputFormat::Human => output_human(ctx, &stats, &records),
    }

    if stats.interrupted {
        return Err(MalhaError::Interrupted);
    }
    Ok(())
}

fn output_human(ctx: &CommandContext, stats: &BatchStats, records: &[RouteRecord]) {
    if !ctx.cli.quiet {
        for record in records {
            match record.cost {
                Some(cost) => println!(
                    "{} -> {}: {} ({})",
                    record.origin,
                    record.destination,
                    format_cost(cost),
                    format_path(&record.path)
                ),
                None => println!(
                    "{} -> {}: {}",
                    record.origin,
                    record.destination,
                    record.status.as_str()
                ),
            }
        }
    }

    println!(
        "{} queries: {} ok, {} failed",
        stats.total,
        stats.success,
        stats.failed()
    );
    let breakdown = [
        (QueryStatus::NoPath, stats.no_path),
        (QueryStatus::NegativeCycle, stats.negative_cycle),
        (QueryStatus::InvalidWeight, stats.invalid_weight),
        (QueryStatus::MissingOrigin, stats.missing_origin),
        (QueryStatus::MissingDestination, stats.missing_destination),
        (QueryStatus::MissingVia, stats.missing_via),
        (QueryStatus::TimedOut, stats.timed_out),
    ];
    for (status, count) in breakdown.iter().filter(|(_, count)| *count > 0) {
        println!("  {}: {count}", status.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(origin: &str, destination: &str) -> Route {
        Route {
            origin: origin.to_string(),
            destination: destination.to_string(),
            via: None,
        }
    }

    #[test]
    fn test_classify_missing_endpoints() {
        let route = route("a", "b");
        assert_eq!(
            classify(&MalhaError::node_not_found("a"), &route),
            QueryStatus::MissingOrigin
        );
        assert_eq!(
            classify(&MalhaError::node_not_found("b"), &route),
            QueryStatus::MissingDestination
        );
        assert_eq!(
            classify(&MalhaError::node_not_found("via"), &route),
            QueryStatus::MissingVia
        );
    }

    #[test]
    fn test_classify_engine_failures() {
        let route = route("a", "b");
        let cycle = MalhaError::NegativeCycle {
            path: vec!["a".to_string()],
            cost: -1.0,
            message: "negative cycle".to_string(),
        };
        assert_eq!(classify(&cycle, &route), QueryStatus::NegativeCycle);
        assert_eq!(
            classify(&MalhaError::no_path("a", "b"), &route),
            QueryStatus::NoPath
        );
    }

    #[test]
    fn test_stats_tally() {
        let mut stats = BatchStats::default();
        stats.record(QueryStatus::Success);
        stats.record(QueryStatus::Success);
        stats.record(QueryStatus::MissingDestination);
        stats.record(QueryStatus::TimedOut);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.success, 2);
        assert_eq!(stats.missing_destination, 1);
        assert_eq!(stats.timed_out, 1);
        assert_eq!(stats.failed(), 2);
    }

    fn record(status: QueryStatus) -> RouteRecord {
        RouteRecord {
            origin: "X".to_string(),
            destination: "Y".to_string(),
            route: route("x", "y"),
            status,
            cost: None,
            path: Vec::new(),
            evidence: None,
            error: None,
        }
    }

    #[test]
    fn test_routes_table_marks_cycle_evidence() {
        let dir = tempfile::tempdir().unwrap();
        let mut found = record(QueryStatus::Success);
        found.cost = Some(2.5);
        found.path = vec!["x".to_string(), "y".to_string()];
        let mut cycle = record(QueryStatus::NegativeCycle);
        cycle.evidence = Some(CycleEvidence {
            cost: -2.0,
            path: vec!["a".to_string(), "b".to_string(), "a".to_string()],
        });
        let missing = record(QueryStatus::MissingOrigin);

        write_outputs(dir.path(), &[found, cycle, missing]).unwrap();

        let table = fs::read_to_string(dir.path().join("routes.csv")).unwrap();
        let rows: Vec<&str> = table.lines().collect();
        assert_eq!(
            rows,
            vec![
                "origin,destination,cost,path,status",
                "X,Y,2.5,x -> y,success",
                "X,Y,-2,a -> b -> a,negative cycle",
                "X,Y,,,missing origin",
            ]
        );
    }
}
