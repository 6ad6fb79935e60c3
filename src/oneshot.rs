//! Single-trial timer for expensive or side-effectful workloads.

use std::io::{self, Write};

use crate::measurement::{
    do_not_optimize_away, elapsed_ns, humanize_ns, now, ResourceProbe, ResourceUsage,
};

/// Times one call of a workload.
///
/// # Example
///
/// ```
/// use tightloop::Oneshot;
///
/// let mut out = Vec::new();
/// Oneshot::new()
///     .run("sum", || (0..1_000u64).sum::<u64>())
///     .report_to(&mut out)
///     .unwrap();
/// assert!(String::from_utf8(out).unwrap().starts_with("[oneshot | sum]"));
/// ```
#[derive(Debug, Default)]
pub struct Oneshot {
    name: String,
    delta_t: f64,
    probe: ResourceProbe,
}

impl Oneshot {
    /// Idle timer; `delta_t` is zero until the first run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `workload` exactly once between two fenced timestamps.
    pub fn run<F, T>(&mut self, name: &str, workload: F) -> &mut Self
    where
        F: FnOnce() -> T,
    {
        self.name.clear();
        self.name.push_str(name);

        self.probe.begin();
        let start = now();
        do_not_optimize_away(&workload());
        let end = now();
        self.delta_t = elapsed_ns(start, end);
        self.probe.end();

        tracing::debug!(oneshot = %self.name, delta_t_ns = self.delta_t, "run finished");
        self
    }

    /// Restrict the calling thread to logical CPU `cpu`.
    ///
    /// Best-effort: a failure leaves a diagnostic on stderr and the timer
    /// keeps working unpinned.
    pub fn pin(&mut self, cpu: usize) -> &mut Self {
        self.probe.pin(cpu);
        self
    }

    /// Keep `value` alive past the optimizer.
    pub fn touch<T>(&mut self, value: &T) -> &mut Self {
        do_not_optimize_away(value);
        self
    }

    /// Write the elapsed time in a human-scaled unit, then the counter readings.
    pub fn report_to<W: Write + ?Sized>(&mut self, out: &mut W) -> io::Result<&mut Self> {
        let (value, unit) = humanize_ns(self.delta_t);
        writeln!(out, "[oneshot | {}]", self.name)?;
        writeln!(out, "  delta_t = {value}{unit}")?;
        self.probe.usage().report_to(out)?;
        Ok(self)
    }

    /// Name given to the last run.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Elapsed nanoseconds of the last run.
    pub fn delta_t(&self) -> f64 {
        self.delta_t
    }

    /// Resource counters around the last run.
    pub fn usage(&self) -> &ResourceUsage {
        self.probe.usage()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_exactly_once() {
        let mut calls = 0;
        let mut timer = Oneshot::new();
        timer.run("once", || calls += 1);
        assert_eq!(calls, 1);
        assert_eq!(timer.name(), "once");
        assert!(timer.delta_t() >= 0.0);
    }

    #[test]
    fn test_report_shape() {
        let mut out = Vec::new();
        Oneshot::new()
            .run("shape", || 1u8)
            .report_to(&mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "[oneshot | shape]");
        assert!(lines[1].starts_with("  delta_t = "));
        assert!(lines[2].starts_with("  begin/max resident set size = "));
        assert!(lines[7].starts_with("  end/major page faults = "));
    }

    #[test]
    fn test_pin_does_not_abort_run() {
        let mut calls = 0;
        Oneshot::new().pin(usize::MAX).run("pinned", || calls += 1);
        assert_eq!(calls, 1);
    }
}
