//! `sccdag scc`: strongly connected components only.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use sccdag_core::{Metrics, SccResult, tarjan_scc};
use sccdag_load::LoadedGraph;
use serde::Serialize;
use tracing::instrument;

use crate::cmd::{GraphFileArgs, load};
use crate::config::{AppConfig, ReportConfig};
use crate::output::{OutputMode, render_mode};
use crate::report::{
    ComponentView, GraphSummary, component_views, pretty_components, pretty_graph,
    text_components, text_graph,
};
use crate::timing::TimingReport;

#[derive(Args, Debug)]
pub struct SccArgs {
    #[command(flatten)]
    pub graph: GraphFileArgs,
}

#[derive(Debug, Serialize)]
pub struct SccReport {
    pub graph: GraphSummary,
    pub components: Vec<ComponentView>,
    /// Components with more than one member, i.e. those holding a cycle.
    pub cyclic_components: Vec<usize>,
}

#[must_use]
pub fn build_report(loaded: &LoadedGraph, scc: &SccResult) -> SccReport {
    SccReport {
        graph: GraphSummary::of(loaded),
        components: component_views(scc),
        cyclic_components: scc.cyclic_components(),
    }
}

pub fn render_pretty(report: &SccReport, cfg: &ReportConfig, w: &mut dyn Write) -> io::Result<()> {
    pretty_graph(w, &report.graph)?;
    pretty_components(w, &report.components, cfg)?;
    writeln!(w)?;
    writeln!(
        w,
        "{} of {} components contain a cycle",
        report.cyclic_components.len(),
        report.components.len()
    )
}

pub fn render_text(report: &SccReport, w: &mut dyn Write) -> io::Result<()> {
    text_graph(w, &report.graph)?;
    text_components(w, &report.components)
}

/// Execute `sccdag scc`.
///
/// # Errors
///
/// Returns load errors or output failures.
#[instrument(skip_all, fields(file = %args.graph.file.display()))]
pub fn run_scc(
    args: &SccArgs,
    output: OutputMode,
    config: &AppConfig,
    timing: &mut TimingReport,
) -> Result<()> {
    let loaded = load(&args.graph.file, None, config)?;
    let mut metrics = Metrics::new();
    let scc = tarjan_scc(&loaded.graph, Some(&mut metrics));
    timing.push("scc", metrics);

    let report = build_report(&loaded, &scc);
    render_mode(output, &report, render_text, |r, w| {
        render_pretty(r, &config.report, w)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sccdag_core::Graph;

    fn loaded(graph: Graph) -> LoadedGraph {
        let edge_records = graph.edge_count();
        LoadedGraph {
            graph,
            source: 0,
            weight_model: None,
            edge_records,
        }
    }

    #[test]
    fn single_cycle_is_one_cyclic_component() {
        let input = loaded(Graph::from_edges(
            3,
            true,
            [(0, 1, 1), (1, 2, 1), (2, 0, 1)],
        ));
        let scc = tarjan_scc(&input.graph, None);
        let report = build_report(&input, &scc);

        assert_eq!(report.components.len(), 1);
        assert_eq!(report.components[0].size, 3);
        assert_eq!(report.cyclic_components, vec![0]);
    }

    #[test]
    fn pretty_output_counts_cycles() {
        let input = loaded(Graph::from_edges(3, true, [(0, 1, 1), (1, 0, 1)]));
        let scc = tarjan_scc(&input.graph, None);
        let report = build_report(&input, &scc);

        let mut buf = Vec::new();
        render_pretty(&report, &ReportConfig::default(), &mut buf).expect("render");
        let out = String::from_utf8(buf).expect("utf8");
        assert!(out.contains("1 of 2 components contain a cycle"));
    }

    #[test]
    fn text_output_has_one_row_per_component() {
        let input = loaded(Graph::new(4, true));
        let scc = tarjan_scc(&input.graph, None);
        let report = build_report(&input, &scc);

        let mut buf = Vec::new();
        render_text(&report, &mut buf).expect("render");
        let out = String::from_utf8(buf).expect("utf8");
        assert_eq!(out.lines().count(), 5);
        assert!(out.lines().skip(1).all(|l| l.starts_with("component\t")));
    }
}
