//! Process resource-usage readings.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

/// One reading of the process resource counters.
///
/// `max_rss` is reported in the platform's native unit (kilobytes on Linux
/// and the BSDs, bytes on macOS).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageReading {
    /// Peak resident set size.
    pub max_rss: u64,
    /// Page faults serviced without I/O.
    pub minor_faults: u64,
    /// Page faults that required I/O.
    pub major_faults: u64,
}

impl UsageReading {
    /// Whether every counter is zero, as produced by a failed read.
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Write the three counters as `  <label>/<counter> = <n>` lines.
    pub fn report_to<W: Write + ?Sized>(&self, out: &mut W, label: &str) -> io::Result<()> {
        writeln!(out, "  {label}/max resident set size = {}", self.max_rss)?;
        writeln!(out, "  {label}/minor page faults = {}", self.minor_faults)?;
        writeln!(out, "  {label}/major page faults = {}", self.major_faults)
    }
}

/// Counter readings taken at the start and end of a measured run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceUsage {
    /// Reading taken before the first trial.
    pub begin: UsageReading,
    /// Reading taken after the last trial.
    pub end: UsageReading,
}

impl ResourceUsage {
    /// Minor faults incurred between the two readings.
    pub fn minor_faults_delta(&self) -> u64 {
        self.end.minor_faults.saturating_sub(self.begin.minor_faults)
    }

    /// Major faults incurred between the two readings.
    pub fn major_faults_delta(&self) -> u64 {
        self.end.major_faults.saturating_sub(self.begin.major_faults)
    }

    /// Write both readings, `begin` first.
    pub fn report_to<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        self.begin.report_to(out, "begin")?;
        self.end.report_to(out, "end")
    }
}
