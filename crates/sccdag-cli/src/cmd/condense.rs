//! `sccdag condense`: the condensation DAG only.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use sccdag_core::{Graph, Metrics, condense_scc, tarjan_scc};
use sccdag_load::LoadedGraph;
use serde::Serialize;
use tracing::instrument;

use crate::cmd::{GraphFileArgs, load};
use crate::config::{AppConfig, ReportConfig};
use crate::output::{OutputMode, render_mode};
use crate::report::{
    EdgeView, GraphSummary, edge_views, pretty_condensation, pretty_graph, text_condensation,
    text_graph,
};
use crate::timing::TimingReport;

#[derive(Args, Debug)]
pub struct CondenseArgs {
    #[command(flatten)]
    pub graph: GraphFileArgs,
}

#[derive(Debug, Serialize)]
pub struct CondenseReport {
    pub graph: GraphSummary,
    /// Vertex count of the condensation.
    pub components: usize,
    pub edges: Vec<EdgeView>,
}

#[must_use]
pub fn build_report(loaded: &LoadedGraph, dag: &Graph) -> CondenseReport {
    CondenseReport {
        graph: GraphSummary::of(loaded),
        components: dag.n(),
        edges: edge_views(dag),
    }
}

pub fn render_pretty(
    report: &CondenseReport,
    cfg: &ReportConfig,
    w: &mut dyn Write,
) -> io::Result<()> {
    pretty_graph(w, &report.graph)?;
    pretty_condensation(w, &report.edges, cfg)
}

pub fn render_text(report: &CondenseReport, w: &mut dyn Write) -> io::Result<()> {
    text_graph(w, &report.graph)?;
    writeln!(w, "components\t{}", report.components)?;
    text_condensation(w, &report.edges)
}

/// Execute `sccdag condense`.
///
/// # Errors
///
/// Returns load errors or output failures.
#[instrument(skip_all, fields(file = %args.graph.file.display()))]
pub fn run_condense(
    args: &CondenseArgs,
    output: OutputMode,
    config: &AppConfig,
    timing: &mut TimingReport,
) -> Result<()> {
    let loaded = load(&args.graph.file, None, config)?;

    let mut scc_metrics = Metrics::new();
    let scc = tarjan_scc(&loaded.graph, Some(&mut scc_metrics));
    timing.push("scc", scc_metrics);

    let mut condense_metrics = Metrics::new();
    let dag = condense_scc(&loaded.graph, &scc, Some(&mut condense_metrics));
    timing.push("condensation", condense_metrics);

    let report = build_report(&loaded, &dag);
    render_mode(output, &report, render_text, |r, w| {
        render_pretty(r, &config.report, w)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn condensed(graph: Graph) -> CondenseReport {
        let scc = tarjan_scc(&graph, None);
        let dag = condense_scc(&graph, &scc, None);
        let loaded = LoadedGraph {
            edge_records: graph.edge_count(),
            graph,
            source: 0,
            weight_model: None,
        };
        build_report(&loaded, &dag)
    }

    #[test]
    fn parallel_inter_component_edges_collapse() {
        // {0,1} cycle with two edges into 2; the first one wins.
        let report = condensed(Graph::from_edges(
            3,
            true,
            [(0, 1, 1), (1, 0, 1), (0, 2, 7), (1, 2, 9)],
        ));
        assert_eq!(report.components, 2);
        assert_eq!(report.edges.len(), 1);
        assert_eq!(report.edges[0].weight, 7);
    }

    #[test]
    fn text_output_lists_edges() {
        let report = condensed(Graph::from_edges(3, true, [(0, 1, 2), (1, 2, 3)]));
        let mut buf = Vec::new();
        render_text(&report, &mut buf).expect("render");
        let out = String::from_utf8(buf).expect("utf8");
        assert!(out.contains("components\t3\n"));
        assert_eq!(out.lines().filter(|l| l.starts_with("edge\t")).count(), 2);
    }

    #[test]
    fn edgeless_condensation_says_so() {
        let report = condensed(Graph::from_edges(2, true, [(0, 1, 1), (1, 0, 1)]));
        let mut buf = Vec::new();
        render_pretty(&report, &ReportConfig::default(), &mut buf).expect("render");
        let out = String::from_utf8(buf).expect("utf8");
        assert!(out.contains("(no edges between components)"));
    }
}
