//! Known-topology regression tests for the full pipeline.
//!
//! Each test uses a hand-crafted graph whose components, orders and distances
//! were worked out by hand and are hardcoded here.

use sccdag_core::{
    GraphError, Graph, Metrics, PathKind, analyze, condense_scc, expand_order, is_dag, kahn,
    longest_paths, shortest_paths, solve_with_order, tarjan_scc,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn sorted(mut v: Vec<usize>) -> Vec<usize> {
    v.sort_unstable();
    v
}

fn weighted_sample() -> Graph {
    Graph::from_edges(
        5,
        true,
        [(0, 1, 2), (0, 2, 5), (1, 2, 1), (1, 3, 2), (2, 3, 1), (3, 4, 3)],
    )
}

fn two_cycles_and_tail() -> Graph {
    Graph::from_edges(
        6,
        true,
        [
            (0, 1, 1),
            (1, 0, 1),
            (2, 3, 1),
            (3, 2, 1),
            (1, 2, 1),
            (3, 4, 1),
            (4, 5, 1),
        ],
    )
}

// ===========================================================================
// Scenario 1: weighted DAG, source 0
//
//   0 →(2) 1 →(2) 3 →(3) 4
//   0 →(5) 2 →(1) 3
//   1 →(1) 2
//
// Shortest: [0, 2, 3, 4, 7], path to 4 = [0, 1, 3, 4]
// Longest:  critical target 4 at 9, path = [0, 2, 3, 4]
// ===========================================================================

#[test]
fn sample_shortest_distances_and_path() {
    let r = shortest_paths(&weighted_sample(), 0, None).expect("acyclic");

    let dist: Vec<Option<i64>> = r.dist.clone();
    assert_eq!(dist, vec![Some(0), Some(2), Some(3), Some(4), Some(7)]);
    assert_eq!(r.path_to(4), Some(vec![0, 1, 3, 4]));
}

#[test]
fn sample_longest_distances_and_critical_path() {
    let r = longest_paths(&weighted_sample(), 0, None).expect("acyclic");

    assert_eq!(r.critical_target(), Some((4, 9)));
    assert_eq!(r.path_to(4), Some(vec![0, 2, 3, 4]));
    assert_eq!(r.distance(2), Some(5));
    assert_eq!(r.distance(3), Some(6));
}

#[test]
fn sample_path_weights_sum_to_distance() {
    let g = weighted_sample();
    for kind in [PathKind::Shortest, PathKind::Longest] {
        let order = kahn(&g, None).expect("acyclic");
        let r = solve_with_order(&g, &order, 0, kind, None);
        for v in 0..g.n() {
            let path = r.path_to(v).expect("all reachable");
            let total: i64 = path
                .windows(2)
                .map(|w| {
                    let e = g
                        .neighbors(w[0])
                        .iter()
                        .find(|e| e.to == w[1])
                        .expect("consecutive vertices are adjacent");
                    i64::from(e.weight)
                })
                .sum();
            assert_eq!(Some(total), r.distance(v), "{kind:?} path to {v}");
        }
    }
}

// ===========================================================================
// Scenario 2: 3-cycle 0 → 1 → 2 → 0
// ===========================================================================

#[test]
fn three_cycle_is_one_component_and_unsortable() {
    let g = Graph::from_edges(3, true, [(0, 1, 1), (1, 2, 1), (2, 0, 1)]);

    let scc = tarjan_scc(&g, None);
    assert_eq!(scc.num_components(), 1);
    assert_eq!(sorted(scc.members(0).to_vec()), vec![0, 1, 2]);

    assert!(matches!(kahn(&g, None), Err(GraphError::NotADag { .. })));
    assert!(matches!(
        shortest_paths(&g, 0, None),
        Err(GraphError::NotADag { .. })
    ));
}

// ===========================================================================
// Scenario 3: two 2-cycles (0,1), (2,3) plus 1→2, 3→4, 4→5
//
// Components: {0,1}, {2,3}, {4}, {5}; condensation is a chain of length 4.
// ===========================================================================

#[test]
fn two_cycles_yield_four_components() {
    let g = two_cycles_and_tail();
    let scc = tarjan_scc(&g, None);

    assert_eq!(scc.num_components(), 4);
    assert_eq!(sorted(scc.sizes()), vec![1, 1, 2, 2]);

    let dag = condense_scc(&g, &scc, None);
    let order = kahn(&dag, None).expect("condensation is a DAG");
    assert_eq!(order.len(), 4);
    assert_eq!(dag.edge_count(), 3);
}

#[test]
fn two_cycles_derived_vertex_order_is_layered() {
    let g = two_cycles_and_tail();
    let scc = tarjan_scc(&g, None);
    let dag = condense_scc(&g, &scc, None);
    let order = kahn(&dag, None).expect("condensation is a DAG");
    let vertices = expand_order(&order, &scc);

    assert_eq!(sorted(vertices[0..2].to_vec()), vec![0, 1]);
    assert_eq!(sorted(vertices[2..4].to_vec()), vec![2, 3]);
    assert_eq!(&vertices[4..], &[4, 5]);
}

#[test]
fn two_cycles_pipeline_critical_path_spans_chain() {
    let a = analyze(&two_cycles_and_tail(), 0).expect("pipeline");

    assert_eq!(a.critical_length(), Some(3));
    assert_eq!(a.critical_path.len(), 4);
    assert_eq!(sorted(a.critical_vertices()), vec![0, 1, 2, 3, 4, 5]);
}

// ===========================================================================
// Condensation weight policy
// ===========================================================================

#[test]
fn condensation_keeps_first_seen_weight() {
    // {0,1} → {2} via 0→2 (w=10) and 1→2 (w=1); 0's edges come first.
    let g = Graph::from_edges(3, true, [(0, 1, 0), (1, 0, 0), (0, 2, 10), (1, 2, 1)]);
    let a = analyze(&g, 0).expect("pipeline");

    let target = a.scc.component_of(2);
    assert_eq!(a.shortest.distance(target), Some(10));
    assert_eq!(a.longest.distance(target), Some(10));
}

// ===========================================================================
// Disconnected graphs
// ===========================================================================

#[test]
fn disjoint_chains_only_reach_source_side() {
    // 0 → 1 → 2 and 3 → 4
    let g = Graph::from_edges(5, true, [(0, 1, 1), (1, 2, 1), (3, 4, 7)]);
    let a = analyze(&g, 3).expect("pipeline");

    assert_eq!(a.shortest.reached_count(), 2);
    assert_eq!(a.critical_length(), Some(7));
    assert_eq!(sorted(a.critical_vertices()), vec![3, 4]);
}

#[test]
fn undirected_graph_condenses_by_connectivity() {
    let g = Graph::from_edges(5, false, [(0, 1, 3), (1, 2, 3), (3, 4, 1)]);
    let a = analyze(&g, 0).expect("pipeline");

    assert_eq!(a.scc.num_components(), 2);
    assert_eq!(a.condensation.edge_count(), 0);
    assert!(is_dag(&a.condensation));
    assert_eq!(a.critical_length(), Some(0));
}

// ===========================================================================
// Instrumentation
// ===========================================================================

#[test]
fn instrumentation_never_changes_results() {
    let g = two_cycles_and_tail();
    let mut m = Metrics::new();

    let plain = tarjan_scc(&g, None);
    let instrumented = tarjan_scc(&g, Some(&mut m));
    assert_eq!(plain, instrumented);
    assert_eq!(m.dfs_visits, 6);
    assert_eq!(m.dfs_edges, 7);
}
