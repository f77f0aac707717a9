#![no_main]

use libfuzzer_sys::fuzz_target;
use sccdag_load::GraphDocument;

// Far below the loader's own limit so each run stays fast.
const FUZZ_MAX_VERTICES: usize = 4096;

fuzz_target!(|data: &[u8]| {
    let Ok(doc) = GraphDocument::from_reader(data) else {
        return;
    };
    if doc.n > FUZZ_MAX_VERTICES {
        return;
    }
    let Ok(loaded) = doc.into_loaded(0) else {
        return;
    };

    let analysis = sccdag_core::analyze(&loaded.graph, loaded.source)
        .expect("condensation of a valid graph is always a DAG");
    assert_eq!(analysis.vertex_order.len(), loaded.graph.n());
    assert!(analysis.shortest.is_reached(analysis.source_component));
});
