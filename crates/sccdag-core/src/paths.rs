//! Single-source shortest and longest (critical) paths on a DAG.
//!
//! # Algorithm
//!
//! Vertices are processed once, in topological order. Each vertex with a
//! known distance relaxes all of its out-edges; unreached vertices are
//! skipped. Because the order respects every edge, a vertex's distance is
//! final by the time it is processed, so one forward pass is exact.
//!
//! Longest paths use the same pass with the comparison flipped. Both assume
//! non-negative weights; this is not checked.
//!
//! Unreached vertices are `None` rather than a numeric sentinel. Distances
//! are accumulated in `i64` from `i32` edge weights.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::GraphError;
use crate::graph::Graph;
use crate::metrics::Metrics;
use crate::topo::kahn;

/// Which optimum the solver computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathKind {
    Shortest,
    Longest,
}

impl PathKind {
    const fn improves(self, candidate: i64, current: Option<i64>) -> bool {
        match current {
            None => true,
            Some(cur) => match self {
                Self::Shortest => candidate < cur,
                Self::Longest => candidate > cur,
            },
        }
    }
}

/// Distances and predecessor links from one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathResult {
    /// Optimum the distances represent.
    pub kind: PathKind,
    /// Source vertex.
    pub source: usize,
    /// `dist[v]` is the best distance to `v`, or `None` if unreached.
    pub dist: Vec<Option<i64>>,
    /// `parent[v]` is the predecessor of `v` on a best path.
    pub parent: Vec<Option<usize>>,
}

impl PathResult {
    /// Distance to `v`, if reached.
    #[must_use]
    pub fn distance(&self, v: usize) -> Option<i64> {
        self.dist[v]
    }

    /// Whether `v` is reachable from the source.
    #[must_use]
    pub fn is_reached(&self, v: usize) -> bool {
        self.dist[v].is_some()
    }

    /// Number of reached vertices (the source included).
    #[must_use]
    pub fn reached_count(&self) -> usize {
        self.dist.iter().filter(|d| d.is_some()).count()
    }

    /// Follow parent links from `target` back to the source and return the
    /// path in source-to-target order.
    ///
    /// Reachability is not checked: an unreached target yields `[target]`.
    /// Use [`PathResult::path_to`] for the checked variant.
    #[must_use]
    pub fn reconstruct_path(&self, target: usize) -> Vec<usize> {
        let mut path = vec![target];
        let mut cur = target;
        while let Some(p) = self.parent[cur] {
            path.push(p);
            cur = p;
        }
        path.reverse();
        path
    }

    /// Path from the source to `target`, or `None` if `target` is unreached.
    #[must_use]
    pub fn path_to(&self, target: usize) -> Option<Vec<usize>> {
        self.is_reached(target)
            .then(|| self.reconstruct_path(target))
    }

    /// The reached vertex with the largest distance, ties going to the lowest
    /// index. For a longest-path result this is the end of the critical path.
    ///
    /// Returns `None` only when the graph is empty.
    #[must_use]
    pub fn critical_target(&self) -> Option<(usize, i64)> {
        let mut best: Option<(usize, i64)> = None;
        for (v, d) in self.dist.iter().enumerate() {
            let Some(d) = *d else { continue };
            match best {
                Some((_, b)) if d <= b => {}
                _ => best = Some((v, d)),
            }
        }
        best
    }
}

// ---------------------------------------------------------------------------
// Solvers
// ---------------------------------------------------------------------------

/// Shortest distances from `source` over `dag`.
///
/// # Errors
///
/// Returns [`GraphError::NotADag`] if `dag` has a cycle.
pub fn shortest_paths(
    dag: &Graph,
    source: usize,
    metrics: Option<&mut Metrics>,
) -> Result<PathResult, GraphError> {
    solve(dag, source, PathKind::Shortest, metrics)
}

/// Longest (critical) distances from `source` over `dag`.
///
/// # Errors
///
/// Returns [`GraphError::NotADag`] if `dag` has a cycle.
pub fn longest_paths(
    dag: &Graph,
    source: usize,
    metrics: Option<&mut Metrics>,
) -> Result<PathResult, GraphError> {
    solve(dag, source, PathKind::Longest, metrics)
}

/// Sort `dag` topologically, then run the DP for `kind`.
///
/// The sort counts its worklist operations into `metrics`; the stopwatch
/// ends up covering only the DP pass.
///
/// # Errors
///
/// Returns [`GraphError::NotADag`] if `dag` has a cycle. No distances are
/// computed in that case.
#[instrument(skip(dag, metrics), fields(n = dag.n()))]
pub fn solve(
    dag: &Graph,
    source: usize,
    kind: PathKind,
    mut metrics: Option<&mut Metrics>,
) -> Result<PathResult, GraphError> {
    let order = kahn(dag, metrics.as_deref_mut())?;
    Ok(solve_with_order(dag, &order, source, kind, metrics))
}

/// Run the DP for `kind` over a precomputed topological `order` of `dag`.
///
/// `order` must be a valid topological order of `dag`; passing anything else
/// produces meaningless distances.
#[must_use]
pub fn solve_with_order(
    dag: &Graph,
    order: &[usize],
    source: usize,
    kind: PathKind,
    mut metrics: Option<&mut Metrics>,
) -> PathResult {
    let n = dag.n();
    let mut dist: Vec<Option<i64>> = vec![None; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];
    dist[source] = Some(0);

    if let Some(m) = metrics.as_deref_mut() {
        m.start_timer();
    }

    let mut relaxations = 0u64;
    for &v in order {
        let Some(dv) = dist[v] else { continue };
        for e in dag.neighbors(v) {
            let candidate = dv + i64::from(e.weight);
            if kind.improves(candidate, dist[e.to]) {
                dist[e.to] = Some(candidate);
                parent[e.to] = Some(v);
                relaxations += 1;
            }
        }
    }

    if let Some(m) = metrics.as_deref_mut() {
        m.relaxations += relaxations;
        m.stop_timer();
    }

    debug!(?kind, source, relaxations, "dag paths solved");
    PathResult {
        kind,
        source,
        dist,
        parent,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// 0→1(2), 0→2(5), 1→2(1), 1→3(2), 2→3(1), 3→4(3)
    fn sample_dag() -> Graph {
        Graph::from_edges(
            5,
            true,
            [(0, 1, 2), (0, 2, 5), (1, 2, 1), (1, 3, 2), (2, 3, 1), (3, 4, 3)],
        )
    }

    #[test]
    fn shortest_distances_on_sample() {
        let r = shortest_paths(&sample_dag(), 0, None).expect("dag");
        let dist: Vec<i64> = r.dist.iter().map(|d| d.expect("reached")).collect();
        assert_eq!(dist, vec![0, 2, 3, 4, 7]);
        assert_eq!(r.reconstruct_path(4), vec![0, 1, 3, 4]);
    }

    #[test]
    fn longest_distances_on_sample() {
        let r = longest_paths(&sample_dag(), 0, None).expect("dag");
        assert_eq!(r.critical_target(), Some((4, 9)));
        assert_eq!(r.reconstruct_path(4), vec![0, 2, 3, 4]);
    }

    #[test]
    fn source_invariants_hold() {
        let r = shortest_paths(&sample_dag(), 0, None).expect("dag");
        assert_eq!(r.distance(0), Some(0));
        assert_eq!(r.parent[0], None);
        assert_eq!(r.reconstruct_path(0), vec![0]);
    }

    #[test]
    fn unreached_vertices_stay_none() {
        // Source 2 cannot reach 0 or 1.
        let r = shortest_paths(&sample_dag(), 2, None).expect("dag");
        assert!(!r.is_reached(0));
        assert!(!r.is_reached(1));
        assert_eq!(r.reached_count(), 3);
        assert_eq!(r.path_to(0), None);
        assert_eq!(r.reconstruct_path(0), vec![0], "unchecked walk");
        assert_eq!(r.path_to(4), Some(vec![2, 3, 4]));
    }

    #[test]
    fn critical_target_ties_go_to_lowest_index() {
        let g = Graph::from_edges(3, true, [(0, 1, 4), (0, 2, 4)]);
        let r = longest_paths(&g, 0, None).expect("dag");
        assert_eq!(r.critical_target(), Some((1, 4)));
    }

    #[test]
    fn critical_target_of_isolated_source_is_source() {
        let g = Graph::new(3, true);
        let r = longest_paths(&g, 1, None).expect("dag");
        assert_eq!(r.critical_target(), Some((1, 0)));
    }

    #[test]
    fn critical_target_of_empty_graph_is_none() {
        let r = PathResult {
            kind: PathKind::Longest,
            source: 0,
            dist: Vec::new(),
            parent: Vec::new(),
        };
        assert_eq!(r.critical_target(), None);
    }

    #[test]
    fn cyclic_input_propagates_not_a_dag() {
        let g = Graph::from_edges(2, true, [(0, 1, 1), (1, 0, 1)]);
        assert!(matches!(
            shortest_paths(&g, 0, None),
            Err(GraphError::NotADag { .. })
        ));
        assert!(matches!(
            longest_paths(&g, 0, None),
            Err(GraphError::NotADag { .. })
        ));
    }

    #[test]
    fn large_weights_do_not_overflow() {
        let g = Graph::from_edges(3, true, [(0, 1, i32::MAX), (1, 2, i32::MAX)]);
        let r = longest_paths(&g, 0, None).expect("dag");
        assert_eq!(r.distance(2), Some(2 * i64::from(i32::MAX)));
    }

    #[test]
    fn relaxation_counter_counts_improvements() {
        let mut m = Metrics::new();
        let _ = shortest_paths(&sample_dag(), 0, Some(&mut m)).expect("dag");
        // 0→1, 0→2, 1→2 (improves 5 to 3), 1→3, then 2→3 and 3→4.
        // 2→3 gives 4, equal to the current 4, so no improvement.
        assert_eq!(m.relaxations, 5);
        assert_eq!(m.topo_pops, 5, "internal sort counted");
    }

    #[test]
    fn solve_with_order_matches_solve() {
        let dag = sample_dag();
        let order = kahn(&dag, None).expect("dag");
        let a = solve_with_order(&dag, &order, 0, PathKind::Longest, None);
        let b = solve(&dag, 0, PathKind::Longest, None).expect("dag");
        assert_eq!(a, b);
    }
}
