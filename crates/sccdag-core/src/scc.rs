//! Strongly connected components via Tarjan's algorithm.
//!
//! # Algorithm
//!
//! A single depth-first pass assigns each vertex a discovery index and a
//! low-link: the smallest discovery index reachable through the DFS subtree
//! plus at most one edge back to a vertex still on the component stack. A
//! vertex whose low-link equals its own index roots a finished component,
//! which is popped off the component stack.
//!
//! The traversal keeps an explicit frame stack instead of recursing, so deep
//! chains cannot overflow the thread stack. Visiting order follows adjacency
//! insertion order, and components are emitted in DFS finishing order, which
//! is a reverse topological order of the condensation.

use tracing::{debug, instrument};

use crate::graph::Graph;
use crate::metrics::Metrics;

/// Partition of a graph's vertices into strongly connected components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SccResult {
    /// `components[c]` lists the vertices of component `c`, in pop order.
    pub components: Vec<Vec<usize>>,
    /// `comp_id[v]` is the component containing vertex `v`.
    pub comp_id: Vec<usize>,
}

impl SccResult {
    /// Number of components.
    #[must_use]
    pub fn num_components(&self) -> usize {
        self.components.len()
    }

    /// Component containing `v`.
    #[must_use]
    pub fn component_of(&self, v: usize) -> usize {
        self.comp_id[v]
    }

    /// Members of component `c`.
    #[must_use]
    pub fn members(&self, c: usize) -> &[usize] {
        &self.components[c]
    }

    /// Size of every component, by component index.
    #[must_use]
    pub fn sizes(&self) -> Vec<usize> {
        self.components.iter().map(Vec::len).collect()
    }

    /// Indices of components with more than one member.
    #[must_use]
    pub fn cyclic_components(&self) -> Vec<usize> {
        self.components
            .iter()
            .enumerate()
            .filter(|(_, members)| members.len() > 1)
            .map(|(c, _)| c)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Compute the strongly connected components of `g`.
///
/// Runs in O(V + E). When `metrics` is supplied, `dfs_visits` is bumped once
/// per vertex entry and `dfs_edges` once per inspected edge, and the
/// stopwatch covers the traversal.
#[must_use]
#[instrument(skip(g, metrics), fields(n = g.n(), edges = g.edge_count()))]
pub fn tarjan_scc(g: &Graph, mut metrics: Option<&mut Metrics>) -> SccResult {
    let n = g.n();

    if let Some(m) = metrics.as_deref_mut() {
        m.start_timer();
    }

    let mut state = Tarjan::new(n);
    for root in 0..n {
        if state.index[root].is_none() {
            state.visit_from(g, root, metrics.as_deref_mut());
        }
    }

    if let Some(m) = metrics.as_deref_mut() {
        m.stop_timer();
    }

    let components = state.components;
    let mut comp_id = vec![0; n];
    for (c, members) in components.iter().enumerate() {
        for &v in members {
            comp_id[v] = c;
        }
    }

    debug!(components = components.len(), "tarjan finished");
    SccResult {
        components,
        comp_id,
    }
}

// ---------------------------------------------------------------------------
// Traversal state
// ---------------------------------------------------------------------------

struct Tarjan {
    next_index: usize,
    index: Vec<Option<usize>>,
    low_link: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    components: Vec<Vec<usize>>,
}

impl Tarjan {
    fn new(n: usize) -> Self {
        Self {
            next_index: 0,
            index: vec![None; n],
            low_link: vec![0; n],
            on_stack: vec![false; n],
            stack: Vec::new(),
            components: Vec::new(),
        }
    }

    fn enter(&mut self, v: usize, metrics: Option<&mut Metrics>) {
        self.index[v] = Some(self.next_index);
        self.low_link[v] = self.next_index;
        self.next_index += 1;
        self.stack.push(v);
        self.on_stack[v] = true;
        if let Some(m) = metrics {
            m.dfs_visits += 1;
        }
    }

    /// Depth-first search from `root`. Each frame is `(vertex, next edge)`.
    fn visit_from(&mut self, g: &Graph, root: usize, mut metrics: Option<&mut Metrics>) {
        let mut frames: Vec<(usize, usize)> = vec![(root, 0)];
        self.enter(root, metrics.as_deref_mut());

        while let Some(&(v, pos)) = frames.last() {
            let out = g.neighbors(v);
            if let Some(edge) = out.get(pos) {
                if let Some(frame) = frames.last_mut() {
                    frame.1 += 1;
                }
                if let Some(m) = metrics.as_deref_mut() {
                    m.dfs_edges += 1;
                }

                let w = edge.to;
                match self.index[w] {
                    None => {
                        self.enter(w, metrics.as_deref_mut());
                        frames.push((w, 0));
                    }
                    Some(w_index) if self.on_stack[w] => {
                        self.low_link[v] = self.low_link[v].min(w_index);
                    }
                    Some(_) => {}
                }
                continue;
            }

            // All edges of v inspected: finish it.
            frames.pop();
            if Some(self.low_link[v]) == self.index[v] {
                self.pop_component(v);
            }
            if let Some(&(parent, _)) = frames.last() {
                self.low_link[parent] = self.low_link[parent].min(self.low_link[v]);
            }
        }
    }

    fn pop_component(&mut self, root: usize) {
        let mut component = Vec::new();
        while let Some(w) = self.stack.pop() {
            self.on_stack[w] = false;
            component.push(w);
            if w == root {
                break;
            }
        }
        self.components.push(component);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
