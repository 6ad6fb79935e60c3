//! Fenced monotonic timestamps.
//!
//! Every clock read is bracketed by a sequentially-consistent fence on both
//! sides, so neither the compiler nor the CPU can hoist work from the timed
//! region above the start stamp or sink it below the end stamp.

use std::sync::atomic::{compiler_fence, fence, Ordering};
use std::time::Instant;

const NS_PER_US: f64 = 1_000.0;
const NS_PER_MS: f64 = 1_000_000.0;
const NS_PER_S: f64 = 1_000_000_000.0;

/// Read the monotonic clock between two full memory fences.
#[inline(always)]
pub fn now() -> Instant {
    fence(Ordering::SeqCst);
    compiler_fence(Ordering::SeqCst);
    let t = Instant::now();
    compiler_fence(Ordering::SeqCst);
    fence(Ordering::SeqCst);
    t
}

/// Nanoseconds between two timestamps taken with [`now`].
///
/// Saturates to zero if `end` is somehow earlier than `start`.
#[inline]
pub fn elapsed_ns(start: Instant, end: Instant) -> f64 {
    end.saturating_duration_since(start).as_nanos() as f64
}

/// Scale a nanosecond count into the largest unit that keeps it at or above one.
///
/// Returns the scaled value and its unit suffix (`s`, `ms`, `us` or `ns`).
pub fn humanize_ns(ns: f64) -> (f64, &'static str) {
    if ns >= NS_PER_S {
        (ns / NS_PER_S, "s")
    } else if ns >= NS_PER_MS {
        (ns / NS_PER_MS, "ms")
    } else if ns >= NS_PER_US {
        (ns / NS_PER_US, "us")
    } else {
        (ns, "ns")
    }
}
