//! End-to-end analysis: SCCs → condensation → order → shortest/longest paths.
//!
//! ## Pipeline
//!
//! ```text
//! Graph (may contain cycles)
//!        ↓  scc::tarjan_scc
//! SccResult (components, comp_id)
//!        ↓  condense::build_condensation
//! condensation DAG (one vertex per component)
//!        ↓  topo::kahn
//! component order  ──→ topo::expand_order → vertex order
//!        ↓  paths::solve_with_order (shortest, longest)
//! PathResult × 2, critical target + path
//! ```
//!
//! Path problems are solved on the condensation, starting from the component
//! that contains the requested source vertex.

use serde::Serialize;
use tracing::{info, instrument};

use crate::condense::build_condensation;
use crate::error::GraphError;
use crate::graph::Graph;
use crate::metrics::Metrics;
use crate::paths::{PathKind, PathResult, solve};
use crate::scc::{SccResult, tarjan_scc};
use crate::topo::{expand_order, kahn};

/// Per-stage instrumentation collected by [`analyze`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct StageMetrics {
    pub scc: Metrics,
    pub condensation: Metrics,
    pub topo: Metrics,
    pub shortest: Metrics,
    pub longest: Metrics,
}

impl StageMetrics {
    /// Stage name and metrics, in pipeline order.
    #[must_use]
    pub fn stages(&self) -> [(&'static str, &Metrics); 5] {
        [
            ("scc", &self.scc),
            ("condensation", &self.condensation),
            ("topo", &self.topo),
            ("shortest", &self.shortest),
            ("longest", &self.longest),
        ]
    }
}

/// Everything the pipeline computes for one graph and source.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Component partition of the input graph.
    pub scc: SccResult,
    /// Condensation DAG over components.
    pub condensation: Graph,
    /// Topological order of the condensation.
    pub component_order: Vec<usize>,
    /// Original vertices ordered component by component.
    pub vertex_order: Vec<usize>,
    /// Source vertex in the input graph.
    pub source: usize,
    /// Component containing `source`.
    pub source_component: usize,
    /// Shortest distances over the condensation.
    pub shortest: PathResult,
    /// Longest distances over the condensation.
    pub longest: PathResult,
    /// End of the critical path (component index) and its length.
    pub critical: Option<(usize, i64)>,
    /// Critical path as a component sequence.
    pub critical_path: Vec<usize>,
    /// Counters and timings, one entry per stage.
    pub metrics: StageMetrics,
}

impl Analysis {
    /// Critical path length, if the graph is non-empty.
    #[must_use]
    pub fn critical_length(&self) -> Option<i64> {
        self.critical.map(|(_, len)| len)
    }

    /// Expand the critical component path into its member vertices.
    #[must_use]
    pub fn critical_vertices(&self) -> Vec<usize> {
        expand_order(&self.critical_path, &self.scc)
    }
}

/// Run the whole pipeline on `graph` from `source`.
///
/// `source` must be `< graph.n()`.
///
/// # Errors
///
/// Returns [`GraphError::NotADag`] if the condensation fails to sort. This
/// cannot happen for a correct SCC partition, but the error is propagated
/// rather than assumed away.
#[instrument(skip(graph), fields(n = graph.n(), edges = graph.edge_count()))]
pub fn analyze(graph: &Graph, source: usize) -> Result<Analysis, GraphError> {
    let mut metrics = StageMetrics::default();

    let scc = tarjan_scc(graph, Some(&mut metrics.scc));
    let condensation = build_condensation(
        graph,
        &scc.comp_id,
        scc.num_components(),
        Some(&mut metrics.condensation),
    );
    let component_order = kahn(&condensation, Some(&mut metrics.topo))?;
    let vertex_order = expand_order(&component_order, &scc);

    let source_component = scc.component_of(source);
    let shortest = solve(
        &condensation,
        source_component,
        PathKind::Shortest,
        Some(&mut metrics.shortest),
    )?;
    let longest = solve(
        &condensation,
        source_component,
        PathKind::Longest,
        Some(&mut metrics.longest),
    )?;

    let critical = longest.critical_target();
    let critical_path = critical
        .map(|(target, _)| longest.reconstruct_path(target))
        .unwrap_or_default();

    info!(
        components = scc.num_components(),
        condensation_edges = condensation.edge_count(),
        source_component,
        critical_length = critical.map(|(_, len)| len),
        "analysis complete"
    );

    Ok(Analysis {
        scc,
        condensation,
        component_order,
        vertex_order,
        source,
        source_component,
        shortest,
        longest,
        critical,
        critical_path,
        metrics,
    })
}
