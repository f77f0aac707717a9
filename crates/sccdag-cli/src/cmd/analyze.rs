//! `sccdag analyze`: the full report.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use sccdag_core::{Analysis, analyze};
use sccdag_load::LoadedGraph;
use serde::Serialize;
use tracing::instrument;

use crate::cmd::{GraphFileArgs, load};
use crate::config::{AppConfig, ReportConfig};
use crate::output::{OutputMode, render_mode};
use crate::report::{
    ComponentView, CriticalView, EdgeView, GraphSummary, PathsView, component_views,
    critical_view, edge_views, paths_view, pretty_components, pretty_condensation,
    pretty_critical, pretty_graph, pretty_order, pretty_paths, text_components,
    text_condensation, text_critical, text_graph, text_order, text_paths,
};
use crate::timing::TimingReport;

// ---------------------------------------------------------------------------
// Clap types
// ---------------------------------------------------------------------------

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub graph: GraphFileArgs,

    /// Source vertex; overrides the file's `source` and the config default.
    #[arg(long, value_name = "N")]
    pub source: Option<usize>,
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct AnalyzeReport {
    pub graph: GraphSummary,
    pub source_component: usize,
    pub components: Vec<ComponentView>,
    pub cyclic_components: Vec<usize>,
    pub condensation: Vec<EdgeView>,
    pub component_order: Vec<usize>,
    pub vertex_order: Vec<usize>,
    pub shortest: PathsView,
    pub critical: Option<CriticalView>,
}

#[must_use]
pub fn build_report(loaded: &LoadedGraph, analysis: &Analysis) -> AnalyzeReport {
    AnalyzeReport {
        graph: GraphSummary::of(loaded),
        source_component: analysis.source_component,
        components: component_views(&analysis.scc),
        cyclic_components: analysis.scc.cyclic_components(),
        condensation: edge_views(&analysis.condensation),
        component_order: analysis.component_order.clone(),
        vertex_order: analysis.vertex_order.clone(),
        shortest: paths_view(&analysis.shortest, &analysis.scc, None),
        critical: critical_view(&analysis.longest, &analysis.scc),
    }
}

pub fn render_pretty(
    report: &AnalyzeReport,
    cfg: &ReportConfig,
    w: &mut dyn Write,
) -> io::Result<()> {
    pretty_graph(w, &report.graph)?;
    pretty_components(w, &report.components, cfg)?;
    pretty_condensation(w, &report.condensation, cfg)?;
    pretty_order(
        w,
        &report.component_order,
        &report.vertex_order,
        &report.components,
        cfg,
    )?;
    pretty_paths(w, &report.shortest, cfg)?;
    pretty_critical(w, report.critical.as_ref())
}

pub fn render_text(report: &AnalyzeReport, w: &mut dyn Write) -> io::Result<()> {
    text_graph(w, &report.graph)?;
    text_components(w, &report.components)?;
    text_condensation(w, &report.condensation)?;
    text_order(w, "order", &report.component_order)?;
    text_order(w, "vertex_order", &report.vertex_order)?;
    text_paths(w, &report.shortest)?;
    text_critical(w, report.critical.as_ref())
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// Execute `sccdag analyze`.
///
/// # Errors
///
/// Returns load errors, or [`GraphError`](sccdag_core::GraphError) if the
/// pipeline fails to order the condensation.
#[instrument(skip_all, fields(file = %args.graph.file.display()))]
pub fn run_analyze(
    args: &AnalyzeArgs,
    output: OutputMode,
    config: &AppConfig,
    timing: &mut TimingReport,
) -> Result<()> {
    let loaded = load(&args.graph.file, args.source, config)?;
    let analysis = analyze(&loaded.graph, loaded.source)?;
    timing.extend_from_pipeline(&analysis.metrics);

    let report = build_report(&loaded, &analysis);
    render_mode(output, &report, render_text, |r, w| {
        render_pretty(r, &config.report, w)
    })
}
