//! Weighted adjacency-list graph shared by every algorithm.
//!
//! Vertices are dense indices `0..n`. The stored adjacency is always a
//! directed view: for undirected graphs [`Graph::add_edge`] inserts the
//! reverse edge as well, so algorithms never need to know the logical kind.
//!
//! Edge endpoints must be valid vertex indices. The graph does not check
//! this (nor weight signs, duplicates or self-loops); the loader does.

use std::fmt;

/// One outgoing adjacency entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    /// Target vertex.
    pub to: usize,
    /// Signed edge weight.
    pub weight: i32,
}

impl Edge {
    #[must_use]
    pub const fn new(to: usize, weight: i32) -> Self {
        Self { to, weight }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "->{}(w={})", self.to, self.weight)
    }
}

/// Directed or undirected weighted graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    directed: bool,
    adj: Vec<Vec<Edge>>,
}

impl Graph {
    /// Create a graph with `n` isolated vertices.
    #[must_use]
    pub fn new(n: usize, directed: bool) -> Self {
        Self {
            directed,
            adj: vec![Vec::new(); n],
        }
    }

    /// Build a graph from `(u, v, w)` triples, in order.
    ///
    /// # Panics
    ///
    /// Panics if an endpoint is `>= n`.
    #[must_use]
    pub fn from_edges(
        n: usize,
        directed: bool,
        edges: impl IntoIterator<Item = (usize, usize, i32)>,
    ) -> Self {
        let mut g = Self::new(n, directed);
        for (u, v, w) in edges {
            g.add_edge(u, v, w);
        }
        g
    }

    /// Number of vertices.
    #[must_use]
    pub fn n(&self) -> usize {
        self.adj.len()
    }

    /// Whether the graph was built as directed.
    #[must_use]
    pub const fn is_directed(&self) -> bool {
        self.directed
    }

    /// Append the edge `u → v` with weight `w`; undirected graphs also get
    /// `v → u`. No deduplication is performed.
    ///
    /// # Panics
    ///
    /// Panics if `u` or `v` is `>= n`.
    pub fn add_edge(&mut self, u: usize, v: usize, w: i32) {
        let n = self.adj.len();
        assert!(u < n, "edge source {u} out of range 0..{n}");
        assert!(v < n, "edge target {v} out of range 0..{n}");
        self.adj[u].push(Edge::new(v, w));
        if !self.directed {
            self.adj[v].push(Edge::new(u, w));
        }
    }

    /// Outgoing edges of `u` in insertion order.
    #[must_use]
    pub fn neighbors(&self, u: usize) -> &[Edge] {
        &self.adj[u]
    }

    /// The whole adjacency structure.
    #[must_use]
    pub fn adj(&self) -> &[Vec<Edge>] {
        &self.adj
    }

    /// Number of stored (directed) adjacency entries. An undirected edge
    /// counts twice.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adj.iter().map(Vec::len).sum()
    }

    /// Iterate stored edges as `(u, v, w)` in vertex, then adjacency order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, i32)> + '_ {
        self.adj
            .iter()
            .enumerate()
            .flat_map(|(u, out)| out.iter().map(move |e| (u, e.to, e.weight)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_graph_has_isolated_vertices() {
        let g = Graph::new(3, true);
        assert_eq!(g.n(), 3);
        assert!(g.is_directed());
        assert_eq!(g.edge_count(), 0);
        assert!((0..3).all(|v| g.neighbors(v).is_empty()));
    }

    #[test]
    fn directed_edge_is_one_way() {
        let mut g = Graph::new(2, true);
        g.add_edge(0, 1, 7);
        assert_eq!(g.neighbors(0), &[Edge::new(1, 7)]);
        assert!(g.neighbors(1).is_empty());
    }

    #[test]
    fn undirected_edge_stores_both_directions() {
        let mut g = Graph::new(2, false);
        g.add_edge(0, 1, 4);
        assert_eq!(g.neighbors(0), &[Edge::new(1, 4)]);
        assert_eq!(g.neighbors(1), &[Edge::new(0, 4)]);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn parallel_edges_and_self_loops_are_kept() {
        let g = Graph::from_edges(2, true, [(0, 1, 1), (0, 1, 2), (1, 1, 3)]);
        assert_eq!(g.neighbors(0).len(), 2);
        assert_eq!(g.neighbors(1), &[Edge::new(1, 3)]);
    }

    #[test]
    fn edges_iterates_in_insertion_order() {
        let g = Graph::from_edges(3, true, [(2, 0, 1), (0, 2, 5), (0, 1, -3)]);
        let edges: Vec<_> = g.edges().collect();
        assert_eq!(edges, vec![(0, 2, 5), (0, 1, -3), (2, 0, 1)]);
    }

    #[test]
    fn edge_display_format() {
        assert_eq!(Edge::new(3, 9).to_string(), "->3(w=9)");
    }

    #[test]
    #[should_panic(expected = "edge target 5 out of range")]
    fn out_of_range_target_panics() {
        let mut g = Graph::new(1, true);
        g.add_edge(0, 5, 1);
    }

    #[test]
    #[should_panic(expected = "edge source 3 out of range 0..2")]
    fn out_of_range_source_panics() {
        let mut g = Graph::new(2, true);
        g.add_edge(3, 0, 1);
    }
}
