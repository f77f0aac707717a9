//! `sccdag topo`: a topological order of the condensation, or of the input
//! graph itself with `--raw`.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use sccdag_core::{Metrics, condense_scc, expand_order, kahn, tarjan_scc};
use serde::Serialize;
use tracing::instrument;

use crate::cmd::{GraphFileArgs, load};
use crate::config::AppConfig;
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};
use crate::report::{GraphSummary, bracketed, pretty_graph, text_graph, text_order};
use crate::timing::TimingReport;

#[derive(Args, Debug)]
pub struct TopoArgs {
    #[command(flatten)]
    pub graph: GraphFileArgs,

    /// Sort the input graph directly instead of its condensation. Fails if
    /// the graph has a cycle.
    #[arg(long)]
    pub raw: bool,
}

/// Which graph the order refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TopoTarget {
    Condensation,
    Input,
}

#[derive(Debug, Serialize)]
pub struct TopoReport {
    pub graph: GraphSummary,
    pub target: TopoTarget,
    pub order: Vec<usize>,
    /// Condensation order expanded into input vertices.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertex_order: Option<Vec<usize>>,
}

pub fn render_pretty(report: &TopoReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_graph(w, &report.graph)?;
    writeln!(w)?;
    match report.target {
        TopoTarget::Condensation => {
            pretty_section(w, "Topological order of components")?;
            pretty_kv(w, "components", bracketed(&report.order))?;
        }
        TopoTarget::Input => {
            pretty_section(w, "Topological order of vertices")?;
            pretty_kv(w, "vertices", bracketed(&report.order))?;
        }
    }
    if let Some(vertex_order) = &report.vertex_order {
        pretty_kv(w, "vertices", bracketed(vertex_order))?;
    }
    Ok(())
}

pub fn render_text(report: &TopoReport, w: &mut dyn Write) -> io::Result<()> {
    text_graph(w, &report.graph)?;
    text_order(w, "order", &report.order)?;
    if let Some(vertex_order) = &report.vertex_order {
        text_order(w, "vertex_order", vertex_order)?;
    }
    Ok(())
}

/// Execute `sccdag topo`.
///
/// # Errors
///
/// Returns load errors, or [`GraphError::NotADag`](sccdag_core::GraphError)
/// when `--raw` is given and the input graph has a cycle.
#[instrument(skip_all, fields(file = %args.graph.file.display(), raw = args.raw))]
pub fn run_topo(
    args: &TopoArgs,
    output: OutputMode,
    config: &AppConfig,
    timing: &mut TimingReport,
) -> Result<()> {
    let loaded = load(&args.graph.file, None, config)?;

    let report = if args.raw {
        let mut metrics = Metrics::new();
        let order = kahn(&loaded.graph, Some(&mut metrics));
        timing.push("topo", metrics);
        TopoReport {
            graph: GraphSummary::of(&loaded),
            target: TopoTarget::Input,
            order: order?,
            vertex_order: None,
        }
    } else {
        let mut scc_metrics = Metrics::new();
        let scc = tarjan_scc(&loaded.graph, Some(&mut scc_metrics));
        timing.push("scc", scc_metrics);

        let mut condense_metrics = Metrics::new();
        let dag = condense_scc(&loaded.graph, &scc, Some(&mut condense_metrics));
        timing.push("condensation", condense_metrics);

        let mut topo_metrics = Metrics::new();
        let order = kahn(&dag, Some(&mut topo_metrics));
        timing.push("topo", topo_metrics);
        let order = order?;

        TopoReport {
            graph: GraphSummary::of(&loaded),
            target: TopoTarget::Condensation,
            vertex_order: Some(expand_order(&order, &scc)),
            order,
        }
    };

    render_mode(output, &report, render_text, render_pretty)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> GraphSummary {
        GraphSummary {
            n: 3,
            edges: 2,
            directed: true,
            source: 0,
            weight_model: None,
        }
    }

    #[test]
    fn raw_report_omits_vertex_order_in_json() {
        let report = TopoReport {
            graph: summary(),
            target: TopoTarget::Input,
            order: vec![0, 1, 2],
            vertex_order: None,
        };
        let json = serde_json::to_value(&report).expect("json");
        assert_eq!(json["target"], "input");
        assert!(json.get("vertex_order").is_none());
    }

    #[test]
    fn condensation_report_prints_both_orders() {
        let report = TopoReport {
            graph: summary(),
            target: TopoTarget::Condensation,
            order: vec![1, 0],
            vertex_order: Some(vec![2, 0, 1]),
        };
        let mut buf = Vec::new();
        render_text(&report, &mut buf).expect("render");
        let out = String::from_utf8(buf).expect("utf8");
        assert!(out.contains("order\t1,0\n"));
        assert!(out.contains("vertex_order\t2,0,1\n"));
    }
}
