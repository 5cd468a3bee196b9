use clap::ValueEnum;
use serde::Serialize;

use malha_core::error::Result;

/// Output format for malha commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for machine consumption
    Json,
}

/// Pretty-print a value as JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Render a cost the way humans read it: integral costs without decimals
pub fn format_cost(cost: f64) -> String {
    if cost.is_infinite() {
        "unreachable".to_string()
    } else if cost.fract() == 0.0 {
        format!("{cost:.0}")
    } else {
        format!("{cost:.3}")
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

/// Join a node sequence with arrows
pub fn format_path(path: &[String]) -> String {
    path.join(" -> ")
}
