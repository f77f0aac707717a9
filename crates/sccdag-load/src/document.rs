//! JSON graph documents.
//!
//! ```json
//! {
//!   "directed": true,
//!   "n": 5,
//!   "edges": [{ "u": 0, "v": 1, "w": 2 }],
//!   "source": 0,
//!   "weight_model": "edge"
//! }
//! ```
//!
//! `directed` defaults to `true`, `edges` to empty, and `source` to the
//! caller-supplied default. Unknown keys are ignored.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use sccdag_core::Graph;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::error::LoadError;

/// Largest vertex count a document may declare. Adjacency lists are
/// allocated up front, so `n` is checked before anything else.
pub const MAX_VERTICES: usize = 1 << 22;

/// One weighted edge record as it appears in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub u: usize,
    pub v: usize,
    pub w: i32,
}

/// A graph file as deserialized, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default = "default_true")]
    pub directed: bool,
    pub n: usize,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_model: Option<String>,
}

const fn default_true() -> bool {
    true
}

/// A validated graph ready for analysis.
#[derive(Debug, Clone)]
pub struct LoadedGraph {
    pub graph: Graph,
    pub source: usize,
    pub weight_model: Option<String>,
    /// Number of edge records in the file (undirected records are stored
    /// twice in `graph`).
    pub edge_records: usize,
}

impl GraphDocument {
    /// Parse a document from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Json`] on syntax or shape errors.
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a document from a reader.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Json`] on syntax, shape or read errors.
    pub fn from_reader(reader: impl Read) -> Result<Self, LoadError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Read and parse the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if the file cannot be opened and
    /// [`LoadError::Json`] if it does not parse.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Check `n` against [`MAX_VERTICES`], then every edge endpoint and the
    /// declared source against `n`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::TooManyVertices`], or the first
    /// [`LoadError::InvalidVertex`] or [`LoadError::InvalidSource`] found.
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.n > MAX_VERTICES {
            return Err(LoadError::TooManyVertices {
                n: self.n,
                max: MAX_VERTICES,
            });
        }
        if let Some((index, e)) = self
            .edges
            .iter()
            .enumerate()
            .find(|(_, e)| e.u >= self.n || e.v >= self.n)
        {
            return Err(LoadError::InvalidVertex {
                index,
                u: e.u,
                v: e.v,
                n: self.n,
            });
        }
        if let Some(source) = self.source {
            check_source(source, self.n)?;
        }
        Ok(())
    }

    /// Validate and materialize the graph. The document's `source` wins over
    /// `default_source`.
    ///
    /// # Errors
    ///
    /// Returns a validation error, or [`LoadError::EmptyGraph`] if `n == 0`.
    pub fn into_loaded(self, default_source: usize) -> Result<LoadedGraph, LoadError> {
        self.validate()?;
        let source = self.source.unwrap_or(default_source);
        check_source(source, self.n)?;

        if self.edges.iter().any(|e| e.w < 0) {
            warn!("graph has negative edge weights; path results assume non-negative weights");
        }

        let edge_records = self.edges.len();
        let graph = Graph::from_edges(
            self.n,
            self.directed,
            self.edges.into_iter().map(|e| (e.u, e.v, e.w)),
        );

        Ok(LoadedGraph {
            graph,
            source,
            weight_model: self.weight_model,
            edge_records,
        })
    }
}

fn check_source(source: usize, n: usize) -> Result<(), LoadError> {
    if n == 0 {
        return Err(LoadError::EmptyGraph);
    }
    if source >= n {
        return Err(LoadError::InvalidSource {
            source_vertex: source,
            n,
        });
    }
    Ok(())
}

/// How [`load_graph`] picks the source vertex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Used when the document declares no source.
    pub default_source: usize,
    /// Replaces whatever the document declares.
    pub source_override: Option<usize>,
}

/// Read, validate and materialize the graph file at `path`.
///
/// # Errors
///
/// Any [`LoadError`] from reading, parsing or validation.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn load_graph(path: &Path, options: LoadOptions) -> Result<LoadedGraph, LoadError> {
    let mut doc = GraphDocument::from_path(path)?;
    if let Some(source) = options.source_override {
        doc.source = Some(source);
    }
    let loaded = doc.into_loaded(options.default_source)?;
    info!(
        n = loaded.graph.n(),
        edges = loaded.edge_records,
        weight_model = loaded.weight_model.as_deref().unwrap_or("unspecified"),
        "loaded graph"
    );
    Ok(loaded)
}
