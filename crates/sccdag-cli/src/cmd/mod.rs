//! Subcommand handlers.
//!
//! Each handler loads its graph through [`load`], runs the library stages it
//! needs with metrics attached, records those metrics in the caller's
//! [`TimingReport`](crate::timing::TimingReport), and renders a report.

pub mod analyze;
pub mod completions;
pub mod condense;
pub mod paths;
pub mod scc;
pub mod topo;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use sccdag_load::{LoadOptions, LoadedGraph, load_graph};

use crate::config::AppConfig;

/// Positional graph file shared by every graph command.
#[derive(Args, Debug, Clone)]
pub struct GraphFileArgs {
    /// JSON graph document to read.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Load `file`, with `source` overriding whatever the document declares.
///
/// # Errors
///
/// Propagates the typed [`LoadError`](sccdag_load::LoadError) so the error
/// renderer can report its code.
pub fn load(file: &Path, source: Option<usize>, config: &AppConfig) -> Result<LoadedGraph> {
    let options = LoadOptions {
        default_source: config.solver.default_source,
        source_override: source,
    };
    Ok(load_graph(file, options)?)
}
