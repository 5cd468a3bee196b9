//! Error types and exit codes for malha
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args/config values)
//! - 3: Data error (missing node, negative weight, no path, negative cycle)

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - the graph or query cannot produce an answer (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during malha operations
#[derive(Error, Debug)]
pub enum MalhaError {
    // Engine errors (exit code 3)
    #[error("node not found: {node}")]
    NodeNotFound { node: String },

    #[error("invalid weight {weight} on edge {from} -> {to}: Dijkstra requires non-negative weights")]
    InvalidWeight {
        from: String,
        to: String,
        weight: f64,
    },

    #[error("no path from {from} to {to}")]
    NoPath { from: String, to: String },

    /// `path` and `cost` are diagnostics only, never a shortest path.
    #[error("{message}")]
    NegativeCycle {
        path: Vec<String>,
        cost: f64,
        message: String,
    },

    // Usage errors (exit code 2)
    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("missing column {column} in {path:?}")]
    MissingColumn { column: String, path: PathBuf },

    #[error("interrupted, partial results were kept")]
    Interrupted,

    #[error("{0}")]
    Other(String),
}

impl MalhaError {
    /// Create an error for a node missing from the graph
    pub fn node_not_found(node: impl Into<String>) -> Self {
        MalhaError::NodeNotFound { node: node.into() }
    }

    /// Create an error for an unreachable target
    pub fn no_path(from: impl Into<String>, to: impl Into<String>) -> Self {
        MalhaError::NoPath {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        MalhaError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        MalhaError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Whether this is one of the per-query engine failures.
    ///
    /// Batch callers record these against the offending query and keep going;
    /// anything else should abort the run.
    pub fn is_query_failure(&self) -> bool {
        matches!(
            self,
            MalhaError::NodeNotFound { .. }
                | MalhaError::InvalidWeight { .. }
                | MalhaError::NoPath { .. }
                | MalhaError::NegativeCycle { .. }
        )
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            MalhaError::UsageError(_) | MalhaError::InvalidValue { .. } => ExitCode::Usage,

            MalhaError::NodeNotFound { .. }
            | MalhaError::InvalidWeight { .. }
            | MalhaError::NoPath { .. }
            | MalhaError::NegativeCycle { .. }
            | MalhaError::MissingColumn { .. } => ExitCode::Data,

            MalhaError::Io(_)
            | MalhaError::Csv(_)
            | MalhaError::Json(_)
            | MalhaError::Toml(_)
            | MalhaError::FailedOperationWithTarget { .. }
            | MalhaError::Interrupted
            | MalhaError::Other(_) => ExitCode::Failure,
        }
    }

    /// Stable identifier used in structured output
    pub fn error_type(&self) -> &'static str {
        match self {
            MalhaError::NodeNotFound { .. } => "node_not_found",
            MalhaError::InvalidWeight { .. } => "invalid_weight",
            MalhaError::NoPath { .. } => "no_path",
            MalhaError::NegativeCycle { .. } => "negative_cycle",
            MalhaError::UsageError(_) => "usage_error",
            MalhaError::InvalidValue { .. } => "invalid_value",
            MalhaError::Io(_) => "io_error",
            MalhaError::Csv(_) => "csv_error",
            MalhaError::Json(_) => "json_error",
            MalhaError::Toml(_) => "toml_error",
            MalhaError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            MalhaError::MissingColumn { .. } => "missing_column",
            MalhaError::Interrupted => "interrupted",
            MalhaError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    /// Negative cycles carry their best-effort path and cost along.
    pub fn to_json(&self) -> serde_json::Value {
        let mut error_obj = serde_json::json!({
            "code": self.exit_code() as i32,
            "type": self.error_type(),
            "message": self.to_string(),
        });

        match self {
            MalhaError::NegativeCycle { path, cost, .. } => {
                error_obj["path"] = serde_json::json!(path);
                error_obj["cost"] = serde_json::json!(cost);
            }
            MalhaError::NodeNotFound { node } => {
                error_obj["node"] = serde_json::json!(node);
            }
            _ => {}
        }

        serde_json::json!({ "error": error_obj })
    }
}

/// Result type alias for malha operations
pub type Result<T> = std::result::Result<T, MalhaError>;
