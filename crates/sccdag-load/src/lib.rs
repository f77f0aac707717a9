#![forbid(unsafe_code)]
//! sccdag-load library.
//!
//! Reads JSON graph files into an [`sccdag_core::Graph`] plus a source
//! vertex. All range checks the algorithm core leaves to its caller happen
//! here.
//!
//! # Conventions
//!
//! - **Errors**: [`LoadError`], convertible to an
//!   [`ErrorCode`](sccdag_core::ErrorCode) for structured reporting.
//! - **Logging**: `tracing` macros.

pub mod document;
pub mod error;

pub use document::{EdgeRecord, GraphDocument, LoadOptions, LoadedGraph, MAX_VERTICES, load_graph};
pub use error::LoadError;
