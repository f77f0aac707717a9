#![forbid(unsafe_code)]
//! sccdag-core library.
//!
//! Structural and optimization properties of directed weighted graphs:
//! strongly connected components, the condensation DAG, a topological order
//! of it, and single-source shortest/longest (critical) paths.
//!
//! # Conventions
//!
//! - **Errors**: the only domain error is [`GraphError::NotADag`]; every
//!   other precondition (vertex ranges, non-negative weights) belongs to the
//!   caller.
//! - **Instrumentation**: algorithms take `Option<&mut Metrics>` and only
//!   write to it.
//! - **Logging**: use `tracing` macros (`info!`, `debug!`, `trace!`).

pub mod condense;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod paths;
pub mod pipeline;
pub mod scc;
pub mod topo;

pub use condense::{build_condensation, condense_scc};
pub use error::{ErrorCode, GraphError};
pub use graph::{Edge, Graph};
pub use metrics::Metrics;
pub use paths::{PathKind, PathResult, longest_paths, shortest_paths, solve, solve_with_order};
pub use pipeline::{Analysis, StageMetrics, analyze};
pub use scc::{SccResult, tarjan_scc};
pub use topo::{expand_order, is_dag, kahn};
