//! Condensation of a graph by its strongly connected components.
//!
//! Every component becomes one vertex of a new directed graph. For each
//! ordered pair of distinct components joined by at least one original edge
//! there is exactly one condensation edge. Its weight is taken from the
//! *first* such edge in vertex/adjacency enumeration order; later parallel
//! edges are ignored, not folded into a minimum or sum. Edges inside a
//! component disappear.
//!
//! The result is acyclic: two distinct components can never reach each other
//! in both directions.

use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::graph::Graph;
use crate::metrics::{Metrics, timed};
use crate::scc::SccResult;

/// Build the condensation DAG of `g` given its component mapping.
///
/// `comp_id` must be the component-id array computed from `g`, with every
/// entry `< comp_count`.
#[must_use]
#[instrument(skip(g, comp_id, metrics), fields(n = g.n()))]
pub fn build_condensation(
    g: &Graph,
    comp_id: &[usize],
    comp_count: usize,
    metrics: Option<&mut Metrics>,
) -> Graph {
    let dag = timed(metrics, || condense(g, comp_id, comp_count));
    debug!(edges = dag.edge_count(), "condensation built");
    dag
}

/// Convenience wrapper over [`build_condensation`] for an [`SccResult`].
#[must_use]
pub fn condense_scc(g: &Graph, scc: &SccResult, metrics: Option<&mut Metrics>) -> Graph {
    build_condensation(g, &scc.comp_id, scc.num_components(), metrics)
}

fn condense(g: &Graph, comp_id: &[usize], comp_count: usize) -> Graph {
    let mut dag = Graph::new(comp_count, true);
    let mut seen: HashSet<(usize, usize)> = HashSet::new();

    for (u, v, w) in g.edges() {
        let (cu, cv) = (comp_id[u], comp_id[v]);
        if cu != cv && seen.insert((cu, cv)) {
            dag.add_edge(cu, cv, w);
        }
    }

    dag
}
