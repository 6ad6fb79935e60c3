//! Repeated-run sampling driver.

use std::io::{self, Write};

use crate::config::Config;
use crate::diagnostics;
use crate::measurement::{do_not_optimize_away, elapsed_ns, now, ResourceProbe, ResourceUsage};
use crate::result::BenchSummary;
use crate::statistics::{kahan_sum, Stats, StatsError};

/// Sampling benchmark: `outer_loops` trials of `inner_loops` back-to-back
/// workload calls, one elapsed-time sample per trial.
///
/// Statistics are computed lazily on first request and cached until the
/// loop counts, the offset or the samples change.
///
/// # Example
///
/// ```
/// use tightloop::Bench;
///
/// let mut x = 0u64;
/// let mut out = Vec::new();
/// Bench::new()
///     .i(2)
///     .o(3)
///     .run("increment", || x += 1)
///     .touch(&x)
///     .report_to(&mut out, "")
///     .unwrap();
/// assert_eq!(x, 6);
/// ```
#[derive(Debug, Default)]
pub struct Bench {
    name: String,
    config: Config,
    samples: Vec<f64>,
    cached: Option<Stats>,
    probe: ResourceProbe,
}

impl Bench {
    /// Driver with the default configuration (100,000 × 23, no offset).
    pub fn new() -> Self {
        Self::default()
    }

    /// Driver with an explicit configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Set the inner-loop count. Discards samples and cached statistics.
    ///
    /// Zero is accepted and makes every trial empty.
    pub fn i(&mut self, inner_loops: u64) -> &mut Self {
        self.discard_samples();
        self.config.inner_loops = inner_loops;
        self
    }

    /// Set the outer-loop count. Discards samples and cached statistics.
    pub fn o(&mut self, outer_loops: u32) -> &mut Self {
        self.discard_samples();
        self.config.outer_loops = outer_loops;
        self
    }

    /// Set the per-invocation baseline subtracted from every sample.
    ///
    /// Keeps the samples; only the cached statistics are dropped.
    pub fn offset(&mut self, offset: f64) -> &mut Self {
        self.cached = None;
        self.config.offset = offset;
        self
    }

    /// Measure `workload`.
    ///
    /// Replaces any earlier samples. Each trial reads the fenced clock, calls
    /// `workload` `inner_loops` times with every result passed through the
    /// optimization barrier, reads the clock again and records the elapsed
    /// nanoseconds. Resource counters are read before the first and after the
    /// last trial.
    pub fn run<F, T>(&mut self, name: &str, mut workload: F) -> &mut Self
    where
        F: FnMut() -> T,
    {
        self.discard_samples();
        self.name.clear();
        self.name.push_str(name);

        let inner = self.config.inner_loops;
        let outer = self.config.outer_loops;
        self.samples.reserve(outer as usize);
        tracing::debug!(bench = %self.name, inner, outer, "starting run");

        self.probe.begin();
        for _ in 0..outer {
            let start = now();
            for _ in 0..inner {
                do_not_optimize_away(&workload());
            }
            let end = now();
            self.samples.push(elapsed_ns(start, end));
        }
        self.probe.end();

        let total = kahan_sum(self.samples.iter().copied());
        tracing::debug!(
            bench = %self.name,
            trials = self.samples.len(),
            total_ns = total,
            "run finished"
        );
        if diagnostics::debug_enabled() {
            eprintln!(
                "{} [DEBUG] {}: {} trials x {} calls in {:.0} ns",
                diagnostics::PREFIX,
                self.name,
                self.samples.len(),
                inner,
                total
            );
        }
        self
    }

    /// Measure an empty workload and adopt its per-call mean as the offset.
    ///
    /// Uses the current loop counts. The calibration samples are discarded
    /// afterwards; the benchmark name is kept. If `outer_loops` is zero the
    /// offset becomes zero.
    pub fn calibrate_offset(&mut self) -> &mut Self {
        let name = std::mem::take(&mut self.name);
        self.config.offset = 0.0;
        self.run("calibration", || ());

        let baseline = self.try_stats().map(Stats::mean).unwrap_or(0.0);
        tracing::debug!(offset_ns = baseline, "calibrated offset");

        self.discard_samples();
        self.name = name;
        self.config.offset = baseline;
        self
    }

    /// Keep `value` alive past the optimizer. See
    /// [`do_not_optimize_away`].
    pub fn touch<T>(&mut self, value: &T) -> &mut Self {
        do_not_optimize_away(value);
        self
    }

    /// Cached statistics, built on first access.
    pub fn try_stats(&mut self) -> Result<&Stats, StatsError> {
        let stats = match self.cached.take() {
            Some(stats) => stats,
            None => {
                Stats::from_samples(&self.samples, self.config.inner_loops, self.config.offset)?
            }
        };
        Ok(self.cached.insert(stats))
    }

    /// Cached statistics, built on first access.
    ///
    /// # Panics
    ///
    /// Panics if no samples were recorded, i.e. [`run`](Self::run) was not
    /// called since the last loop-count change or `outer_loops` is zero.
    pub fn stats(&mut self) -> &Stats {
        assert!(
            !self.samples.is_empty(),
            "statistics requested for benchmark `{}` without any recorded sample",
            self.name
        );
        match self.try_stats() {
            Ok(stats) => stats,
            Err(err) => panic!("{err}"),
        }
    }

    /// Mean per-invocation time in nanoseconds.
    ///
    /// # Panics
    ///
    /// Same as [`stats`](Self::stats).
    pub fn average(&mut self) -> f64 {
        self.stats().mean()
    }

    /// Write a short report.
    ///
    /// `total` is the sum of the raw, unnormalized trial durations, while
    /// `average` and `stddev` are per-invocation figures net of the offset.
    /// The offset line only appears when it is nonzero.
    ///
    /// # Panics
    ///
    /// Same as [`stats`](Self::stats).
    pub fn report_to<W: Write + ?Sized>(
        &mut self,
        out: &mut W,
        prefix: &str,
    ) -> io::Result<&mut Self> {
        let sep = if prefix.is_empty() { "  stats" } else { "  stats/" };
        let total = kahan_sum(self.samples.iter().copied());
        let offset = self.config.offset;
        let (mean, stddev) = {
            let stats = self.stats();
            (stats.mean(), stats.stddev())
        };

        writeln!(out, "[benchmark | {}]", self.name)?;
        writeln!(out, "{sep}{prefix}/total = {total}")?;
        writeln!(out, "{sep}{prefix}/average = {mean}")?;
        writeln!(out, "{sep}{prefix}/stddev = {stddev}")?;
        if offset != 0.0 {
            writeln!(out, "{sep}{prefix}/offset = {offset}")?;
        }
        writeln!(out)?;
        Ok(self)
    }

    /// Snapshot of the name, configuration, total, statistics and usage.
    pub fn summary(&mut self) -> Result<BenchSummary, StatsError> {
        let stats = self.try_stats()?.clone();
        Ok(BenchSummary {
            name: self.name.clone(),
            config: self.config,
            total_ns: kahan_sum(self.samples.iter().copied()),
            stats,
            usage: *self.probe.usage(),
        })
    }

    /// Name given to the last [`run`](Self::run).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Raw trial durations in nanoseconds, in measurement order.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Resource counters around the last run.
    pub fn usage(&self) -> &ResourceUsage {
        self.probe.usage()
    }

    /// Whether statistics are currently cached.
    pub fn has_cached_stats(&self) -> bool {
        self.cached.is_some()
    }

    fn discard_samples(&mut self) {
        self.cached = None;
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workload_call_count() {
        let mut calls = 0u32;
        let mut bench = Bench::new();
        bench.i(2).o(3).run("count", || calls += 1);
        assert_eq!(calls, 6);
        assert_eq!(bench.samples().len(), 3);
        assert!(bench.samples().iter().all(|&s| s >= 0.0));
        assert_eq!(bench.name(), "count");
    }

    #[test]
    fn test_loop_setters_discard_samples() {
        let mut bench = Bench::with_config(Config::quick());
        bench.run("a", || 1u8);
        assert!(!bench.samples().is_empty());
        bench.i(10);
        assert!(bench.samples().is_empty());

        bench.run("b", || 1u8);
        bench.o(5);
        assert!(bench.samples().is_empty());
    }

    #[test]
    fn test_offset_keeps_samples_and_drops_cache() {
        let mut bench = Bench::with_config(Config::quick());
        bench.run("a", || 1u8);
        let before = bench.stats().mean();
        assert!(bench.has_cached_stats());

        bench.offset(2.0);
        assert!(!bench.has_cached_stats());
        assert_eq!(bench.samples().len(), 11);
        let after = bench.stats().mean();
        assert!((before - 2.0 - after).abs() < 1e-9);
    }

    #[test]
    fn test_try_stats_without_samples() {
        let mut bench = Bench::new();
        assert_eq!(bench.try_stats().err(), Some(StatsError::Empty));
        assert!(!bench.has_cached_stats());
    }

    #[test]
    #[should_panic(expected = "without any recorded sample")]
    fn test_stats_without_samples_panics() {
        Bench::new().stats();
    }

    #[test]
    fn test_zero_outer_loops_records_nothing() {
        let mut calls = 0u32;
        let mut bench = Bench::new();
        bench.o(0).run("none", || calls += 1);
        assert_eq!(calls, 0);
        assert!(bench.samples().is_empty());
    }

    #[test]
    fn test_calibrate_offset_keeps_name_and_clears_samples() {
        let mut bench = Bench::with_config(Config::quick());
        bench.run("real", || 3u16);
        bench.calibrate_offset();
        assert_eq!(bench.name(), "real");
        assert!(bench.samples().is_empty());
        assert!(bench.config().offset >= 0.0);
    }
}
