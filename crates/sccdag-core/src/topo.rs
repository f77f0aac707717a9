//! Topological ordering with Kahn's algorithm.
//!
//! Zero in-degree vertices are seeded in index order and the worklist is a
//! FIFO queue, so the produced order is deterministic for a given graph. If
//! fewer than `n` vertices come out, the graph has a cycle and the sort
//! fails with [`GraphError::NotADag`].

use std::collections::VecDeque;

use tracing::{debug, instrument};

use crate::error::GraphError;
use crate::graph::Graph;
use crate::metrics::Metrics;
use crate::scc::SccResult;

/// Compute a topological order of `dag`.
///
/// With `metrics`, `topo_pushes`/`topo_pops` count worklist operations and
/// the stopwatch covers the sort.
///
/// # Errors
///
/// Returns [`GraphError::NotADag`] when `dag` contains a cycle.
#[instrument(skip(dag, metrics), fields(n = dag.n()))]
pub fn kahn(dag: &Graph, mut metrics: Option<&mut Metrics>) -> Result<Vec<usize>, GraphError> {
    let n = dag.n();

    if let Some(m) = metrics.as_deref_mut() {
        m.start_timer();
    }

    let mut in_degree = vec![0usize; n];
    for (_, v, _) in dag.edges() {
        in_degree[v] += 1;
    }

    let mut queue: VecDeque<usize> = VecDeque::new();
    for v in (0..n).filter(|&v| in_degree[v] == 0) {
        queue.push_back(v);
        if let Some(m) = metrics.as_deref_mut() {
            m.topo_pushes += 1;
        }
    }

    let mut order = Vec::with_capacity(n);
    while let Some(v) = queue.pop_front() {
        if let Some(m) = metrics.as_deref_mut() {
            m.topo_pops += 1;
        }
        order.push(v);
        for e in dag.neighbors(v) {
            in_degree[e.to] -= 1;
            if in_degree[e.to] == 0 {
                queue.push_back(e.to);
                if let Some(m) = metrics.as_deref_mut() {
                    m.topo_pushes += 1;
                }
            }
        }
    }

    if let Some(m) = metrics.as_deref_mut() {
        m.stop_timer();
    }

    if order.len() != n {
        debug!(ordered = order.len(), total = n, "cycle detected");
        return Err(GraphError::NotADag {
            ordered: order.len(),
            total: n,
        });
    }

    Ok(order)
}

/// Return `true` if `g` has no directed cycle.
#[must_use]
pub fn is_dag(g: &Graph) -> bool {
    kahn(g, None).is_ok()
}

/// Expand an order over components into an order over original vertices by
/// concatenating each component's members.
#[must_use]
pub fn expand_order(order: &[usize], scc: &SccResult) -> Vec<usize> {
    order
        .iter()
        .flat_map(|&c| scc.members(c).iter().copied())
        .collect()
}
