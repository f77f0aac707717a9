//! Stage-level timing report printed to stderr by `--timing`.

use sccdag_core::{Metrics, StageMetrics};
use serde_json::json;

/// Returns true when `SCCDAG_TIMING` enables the timing report.
///
/// Supported truthy values: `1`, `true`, `yes`, `on` (case-insensitive).
#[must_use]
pub fn timing_enabled_from_env() -> bool {
    std::env::var("SCCDAG_TIMING")
        .ok()
        .is_some_and(|value| is_truthy(value.as_str()))
}

/// Metrics for every stage a command ran, in execution order.
#[derive(Debug, Clone, Default)]
pub struct TimingReport {
    stages: Vec<(String, Metrics)>,
}

impl TimingReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one stage.
    pub fn push(&mut self, stage: impl Into<String>, metrics: Metrics) {
        self.stages.push((stage.into(), metrics));
    }

    /// Record every stage of a pipeline run.
    pub fn extend_from_pipeline(&mut self, metrics: &StageMetrics) {
        for (stage, m) in metrics.stages() {
            self.push(stage, m.clone());
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Render the report as JSON.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let stages = self
            .stages
            .iter()
            .map(|(stage, m)| m.to_json(stage))
            .collect::<Vec<_>>();
        json!({ "stages": stages })
    }

    /// Render the report as a simple table for terminal output.
    #[must_use]
    pub fn display_table(&self) -> String {
        if self.stages.is_empty() {
            return "No stages recorded.".to_string();
        }

        let mut out = String::new();
        out.push_str(
            "stage            visits    edges   pushes     pops    relax    elapsed\n",
        );
        out.push_str(
            "---------------------------------------------------------------------\n",
        );
        for (stage, m) in &self.stages {
            out.push_str(&format!(
                "{:<14} {:>8} {:>8} {:>8} {:>8} {:>8} {:>10}\n",
                stage,
                m.dfs_visits,
                m.dfs_edges,
                m.topo_pushes,
                m.topo_pops,
                m.relaxations,
                format!("{:.3}ms", m.elapsed_millis()),
            ));
        }
        out
    }
}

fn is_truthy(value: &str) -> bool {
    value.eq_ignore_ascii_case("1")
        || value.eq_ignore_ascii_case("true")
        || value.eq_ignore_ascii_case("yes")
        || value.eq_ignore_ascii_case("on")
}
