use std::path::PathBuf;

use sccdag_core::ErrorCode;

/// Failures while reading or validating a graph document.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("failed to read graph file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or has the wrong shape.
    #[error("malformed graph document: {0}")]
    Json(#[from] serde_json::Error),

    /// An edge endpoint is outside `0..n`.
    #[error("edge #{index} ({u} -> {v}) references a vertex outside 0..{n}")]
    InvalidVertex {
        index: usize,
        u: usize,
        v: usize,
        n: usize,
    },

    /// The declared source vertex is outside `0..n`.
    #[error("source vertex {source_vertex} is outside 0..{n}")]
    InvalidSource { source_vertex: usize, n: usize },

    /// The declared vertex count is above [`MAX_VERTICES`](crate::MAX_VERTICES).
    #[error("graph declares {n} vertices; at most {max} are supported")]
    TooManyVertices { n: usize, max: usize },

    /// The default source handed to the loader is unusable for an empty graph.
    #[error("graph has no vertices, so no source vertex can be chosen")]
    EmptyGraph,
}

impl LoadError {
    /// Machine-readable code for this error.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Io { .. } => ErrorCode::InputUnreadable,
            Self::Json(_) => ErrorCode::MalformedInput,
            Self::InvalidVertex { .. } => ErrorCode::InvalidVertex,
            Self::TooManyVertices { .. } => ErrorCode::GraphTooLarge,
            Self::InvalidSource { .. } | Self::EmptyGraph => ErrorCode::InvalidSource,
        }
    }
}
