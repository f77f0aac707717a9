#![no_main]

use libfuzzer_sys::fuzz_target;
use sccdag_core::{Graph, analyze, is_dag};

// First byte picks n (1..=64); every following 3-byte chunk is an edge
// `(u % n, v % n, w)` with `w` as a small signed weight.
fuzz_target!(|data: &[u8]| {
    let Some((&head, rest)) = data.split_first() else {
        return;
    };
    let n = usize::from(head % 64) + 1;
    let edges = rest.chunks_exact(3).map(|c| {
        (
            usize::from(c[0]) % n,
            usize::from(c[1]) % n,
            i32::from(c[2] as i8),
        )
    });
    let g = Graph::from_edges(n, true, edges);

    let analysis = analyze(&g, 0).expect("condensation is always a DAG");
    assert!(is_dag(&analysis.condensation));

    let mut seen = vec![false; n];
    for &v in &analysis.vertex_order {
        assert!(!seen[v], "vertex {v} listed twice");
        seen[v] = true;
    }
    assert!(seen.iter().all(|&s| s));

    if let Some((target, len)) = analysis.critical {
        assert_eq!(analysis.longest.distance(target), Some(len));
    }
});
