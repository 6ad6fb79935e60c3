//! Serializable result of a sampling run.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::measurement::ResourceUsage;
use crate::statistics::Stats;

/// Everything known about one [`Bench`](crate::Bench) run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchSummary {
    /// Benchmark name.
    pub name: String,

    /// Loop counts and offset in effect for the run.
    pub config: Config,

    /// Sum of the raw trial durations in nanoseconds (not normalized).
    pub total_ns: f64,

    /// Per-invocation statistics.
    pub stats: Stats,

    /// Resource counters around the run.
    pub usage: ResourceUsage,
}

impl BenchSummary {
    /// Per-invocation mean in nanoseconds.
    pub fn mean_ns(&self) -> f64 {
        self.stats.mean()
    }

    /// Spread between the upper and lower quartiles.
    pub fn interquartile_range(&self) -> f64 {
        self.stats.q3() - self.stats.q1()
    }
}
