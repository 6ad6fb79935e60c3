//! Measurement primitives shared by [`Bench`](crate::Bench) and
//! [`Oneshot`](crate::Oneshot).
//!
//! This module provides:
//! - Fenced monotonic timestamps
//! - The optimization barrier that keeps measured results alive
//! - Resource-usage readings and the probe that takes them
//!
//! # Timestamps
//!
//! Timing uses `std::time::Instant` (`CLOCK_MONOTONIC` on Linux) read between
//! two sequentially-consistent fences. The fences keep the workload inside
//! the timed region; the clock itself is the platform's steady clock.

mod barrier;
mod probe;
mod timer;
mod usage;

pub use barrier::{do_not_optimize_away, needs_indirect};
pub use probe::{PlatformCounters, ProbeError, ResourceCounters, ResourceProbe, UnsupportedCounters};
pub use timer::{elapsed_ns, humanize_ns, now};
pub use usage::{ResourceUsage, UsageReading};

#[cfg(target_os = "linux")]
pub use probe::LinuxCounters;

#[cfg(all(unix, not(target_os = "linux")))]
pub use probe::UnixCounters;
