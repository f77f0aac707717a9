//! Operation counters and elapsed-time measurement.
//!
//! A [`Metrics`] value is threaded into the algorithms as
//! `Option<&mut Metrics>`. The algorithms only ever write to it; nothing they
//! compute depends on what it contains.

use std::time::{Duration, Instant};

use serde::{Serialize, Serializer};
use serde_json::json;

/// Counters and a stopwatch for one algorithm run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metrics {
    /// Vertices entered by the SCC depth-first search.
    pub dfs_visits: u64,
    /// Outgoing edges inspected by the SCC depth-first search.
    pub dfs_edges: u64,
    /// Worklist pushes in Kahn's algorithm.
    pub topo_pushes: u64,
    /// Worklist pops in Kahn's algorithm.
    pub topo_pops: u64,
    /// Successful distance improvements in the DAG path solvers.
    pub relaxations: u64,
    #[serde(rename = "elapsed_us", serialize_with = "serialize_micros")]
    elapsed: Duration,
    #[serde(skip)]
    started: Option<Instant>,
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the stopwatch.
    pub fn start_timer(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Stop the stopwatch and record the time since the last start.
    ///
    /// Stopping a stopwatch that was never started records nothing.
    pub fn stop_timer(&mut self) {
        if let Some(started) = self.started.take() {
            self.elapsed = started.elapsed();
        }
    }

    /// Time recorded by the last start/stop pair.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Elapsed time in fractional milliseconds.
    #[must_use]
    pub fn elapsed_millis(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1_000.0
    }

    /// Zero every counter and the stopwatch.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Render as a JSON object tagged with a stage name.
    #[must_use]
    pub fn to_json(&self, stage: &str) -> serde_json::Value {
        json!({
            "stage": stage,
            "dfs_visits": self.dfs_visits,
            "dfs_edges": self.dfs_edges,
            "topo_pushes": self.topo_pushes,
            "topo_pops": self.topo_pops,
            "relaxations": self.relaxations,
            "elapsed_us": micros(self.elapsed),
        })
    }
}

fn micros(d: Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}

fn serialize_micros<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(micros(*d))
}

/// Run `f` between a start and stop of the optional stopwatch.
pub(crate) fn timed<R>(metrics: Option<&mut Metrics>, f: impl FnOnce() -> R) -> R {
    match metrics {
        Some(m) => {
            m.start_timer();
            let out = f();
            m.stop_timer();
            out
        }
        None => f(),
    }
}
