//! `sccdag paths`: single-source shortest or longest paths over the
//! condensation.

use std::io::{self, Write};

use anyhow::{Result, bail};
use clap::Args;
use sccdag_core::{Metrics, PathKind, condense_scc, solve, tarjan_scc};
use serde::Serialize;
use tracing::instrument;

use crate::cmd::{GraphFileArgs, load};
use crate::config::{AppConfig, ReportConfig};
use crate::output::{OutputMode, render_mode};
use crate::report::{
    CriticalView, GraphSummary, PathsView, critical_view, paths_view, pretty_critical,
    pretty_graph, pretty_paths, text_critical, text_graph, text_paths,
};
use crate::timing::TimingReport;

#[derive(Args, Debug)]
pub struct PathsArgs {
    #[command(flatten)]
    pub graph: GraphFileArgs,

    /// Source vertex; overrides the file's `source` and the config default.
    #[arg(long, value_name = "N")]
    pub source: Option<usize>,

    /// Maximize path weight instead of minimizing it.
    #[arg(long)]
    pub longest: bool,

    /// Only report the path to the component containing this vertex.
    #[arg(long, value_name = "T")]
    pub target: Option<usize>,
}

impl PathsArgs {
    const fn kind(&self) -> PathKind {
        if self.longest {
            PathKind::Longest
        } else {
            PathKind::Shortest
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PathsReport {
    pub graph: GraphSummary,
    /// Requested target vertex, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<usize>,
    pub paths: PathsView,
    /// Present for `--longest` runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical: Option<CriticalView>,
}

pub fn render_pretty(report: &PathsReport, cfg: &ReportConfig, w: &mut dyn Write) -> io::Result<()> {
    pretty_graph(w, &report.graph)?;
    pretty_paths(w, &report.paths, cfg)?;
    if let Some(target) = report.target.filter(|_| report.paths.paths.is_empty()) {
        writeln!(w, "vertex {target} is not reachable from the source")?;
    }
    if report.paths.kind == PathKind::Longest {
        pretty_critical(w, report.critical.as_ref())?;
    }
    Ok(())
}

pub fn render_text(report: &PathsReport, w: &mut dyn Write) -> io::Result<()> {
    text_graph(w, &report.graph)?;
    text_paths(w, &report.paths)?;
    text_critical(w, report.critical.as_ref())
}

/// Execute `sccdag paths`.
///
/// # Errors
///
/// Returns load errors, or an error if `--target` is not a vertex of the
/// graph.
#[instrument(skip_all, fields(file = %args.graph.file.display(), longest = args.longest))]
pub fn run_paths(
    args: &PathsArgs,
    output: OutputMode,
    config: &AppConfig,
    timing: &mut TimingReport,
) -> Result<()> {
    let loaded = load(&args.graph.file, args.source, config)?;
    let n = loaded.graph.n();
    if let Some(target) = args.target.filter(|&t| t >= n) {
        bail!("target vertex {target} is outside 0..{n}");
    }

    let mut scc_metrics = Metrics::new();
    let scc = tarjan_scc(&loaded.graph, Some(&mut scc_metrics));
    timing.push("scc", scc_metrics);

    let mut condense_metrics = Metrics::new();
    let dag = condense_scc(&loaded.graph, &scc, Some(&mut condense_metrics));
    timing.push("condensation", condense_metrics);

    let kind = args.kind();
    let mut solve_metrics = Metrics::new();
    let result = solve(
        &dag,
        scc.component_of(loaded.source),
        kind,
        Some(&mut solve_metrics),
    );
    timing.push(
        match kind {
            PathKind::Shortest => "shortest",
            PathKind::Longest => "longest",
        },
        solve_metrics,
    );
    let result = result?;

    let target_component = args.target.map(|t| scc.component_of(t));
    let report = PathsReport {
        graph: GraphSummary::of(&loaded),
        target: args.target,
        paths: paths_view(&result, &scc, target_component),
        critical: match kind {
            PathKind::Longest => critical_view(&result, &scc),
            PathKind::Shortest => None,
        },
    };

    render_mode(output, &report, render_text, |r, w| {
        render_pretty(r, &config.report, w)
    })
}
