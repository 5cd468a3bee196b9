//! `malha metrics`: degree, density, ego networks and groups

use serde::Serialize;

use crate::cli::commands::MetricsArgs;
use crate::cli::output::print_json;
use crate::cli::OutputFormat;
use crate::commands::dispatch::CommandContext;
use malha_core::error::Result;
use malha_core::graph::metrics::{self, EgoMetrics, GraphSummary, GroupMetrics, Leaders};
use malha_core::io;

#[derive(Debug, Serialize)]
struct MetricsOutput {
    summary: GraphSummary,
    max_degree: Leaders<usize>,
    densest_ego: Leaders<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    groups: Vec<GroupMetrics>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    egos: Vec<EgoMetrics>,
}

pub fn execute(ctx: &CommandContext, args: &MetricsArgs) -> Result<()> {
    let (graph, _) = ctx.load_graph(&args.edges)?;

    let groups = match &args.groups {
        Some(path) => {
            let groups =
                io::load_groups(path, &ctx.config.columns, ctx.config.graph.normalize_names)?;
            metrics::group_metrics(&graph, &groups)
        }
        None => Vec::new(),
    };
    let egos = if args.egos {
        metrics::all_ego_metrics(&graph)
    } else {
        Vec::new()
    };

    let output = MetricsOutput {
        summary: metrics::summary(&graph),
        max_degree: metrics::max_degree_nodes(&graph),
        densest_ego: metrics::densest_ego_nodes(&graph),
        groups,
        egos,
    };

    match ctx.cli.format {
        OutputFormat::Json => print_json(&output),
        OutputFormat::Human => {
            output_human(&output);
            Ok(())
        }
    }
}

fn output_human(output: &MetricsOutput) {
    let summary = &output.summary;
    println!(
        "order {}, size {}, density {:.4}",
        summary.order, summary.size, summary.density
    );
    println!(
        "max degree {}: {}",
        output.max_degree.value,
        output.max_degree.nodes.join(", ")
    );
    println!(
        "densest ego network {:.4}: {}",
        output.densest_ego.value,
        output.densest_ego.nodes.join(", ")
    );

    if !output.groups.is_empty() {
        println!("groups:");
        for group in &output.groups {
            println!(
                "  {}: order {}, size {}, density {:.4}",
                group.group, group.order, group.size, group.density
            );
        }
    }

    if !output.egos.is_empty() {
        println!("ego networks:");
        for ego in &output.egos {
            println!(
                "  {}: degree {}, order {}, size {}, density {:.4}",
                ego.node, ego.degree, ego.ego_order, ego.ego_size, ego.ego_density
            );
        }
    }
}
