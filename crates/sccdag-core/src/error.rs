//! Error types for the graph algorithms.
//!
//! The algorithms are total over valid input with a single exception: the
//! topological sorter fails on cyclic graphs, and every consumer of a
//! topological order (the DAG path solvers, the analysis pipeline) propagates
//! that same failure unchanged.

use std::fmt;

/// Machine-readable error codes shared by the library crates and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NotADag,
    InvalidVertex,
    InvalidSource,
    MalformedInput,
    GraphTooLarge,
    InputUnreadable,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotADag => "E2001",
            Self::InvalidVertex => "E3001",
            Self::InvalidSource => "E3002",
            Self::MalformedInput => "E3003",
            Self::GraphTooLarge => "E3004",
            Self::InputUnreadable => "E5001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotADag => "Graph is not a DAG",
            Self::InvalidVertex => "Edge endpoint out of range",
            Self::InvalidSource => "Source vertex out of range",
            Self::MalformedInput => "Malformed graph document",
            Self::GraphTooLarge => "Vertex count exceeds the loader limit",
            Self::InputUnreadable => "Graph file could not be read",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::NotADag => {
                Some("Run the ordering on the condensation graph, or remove the cycle.")
            }
            Self::InvalidVertex => Some("Every edge endpoint must satisfy 0 <= u, v < n."),
            Self::InvalidSource => Some("Pick a source vertex in 0..n or omit it."),
            Self::MalformedInput => {
                Some("Expected {\"directed\", \"n\", \"edges\": [{\"u\",\"v\",\"w\"}], \"source\"}.")
            }
            Self::GraphTooLarge => Some("Split the graph or check the document's \"n\" field."),
            Self::InputUnreadable => Some("Check the path and read permissions."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// The single domain failure of the algorithm core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Kahn's algorithm could only order `ordered` of `total` vertices; the
    /// remainder lie on or behind a cycle.
    #[error("graph is not a DAG: only {ordered} of {total} vertices could be ordered")]
    NotADag { ordered: usize, total: usize },
}

impl GraphError {
    /// Machine-readable code for this error.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::NotADag { .. } => ErrorCode::NotADag,
        }
    }
}
