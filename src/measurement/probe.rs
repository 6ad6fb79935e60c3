//! Resource-usage probe and thread pinning.
//!
//! Platform access sits behind [`ResourceCounters`]; one implementation is
//! compiled per target family:
//! - **Linux**: `getrusage(RUSAGE_SELF)` and `sched_setaffinity`
//! - **Other Unix**: `getrusage(RUSAGE_SELF)`; pinning is unsupported
//! - **Everything else**: both operations report `Unsupported`
//!
//! [`ResourceProbe`] never propagates a failure. A failed reading becomes
//! all-zero and a failed pin is skipped; both leave one diagnostic line on
//! stderr.

use std::io;
use std::time::Instant;

use super::timer;
use super::usage::{ResourceUsage, UsageReading};
use crate::diagnostics;

/// Error from a platform counter or affinity call.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The OS call returned an error.
    #[error("{call} failed: error = {source}")]
    Os {
        /// Name of the failing call, e.g. `getrusage()`.
        call: &'static str,
        /// OS error reported by the call.
        source: io::Error,
    },

    /// The requested CPU index does not fit the platform's affinity mask.
    #[error("cpu index {cpu} exceeds the affinity mask capacity of {capacity}")]
    CpuOutOfRange {
        /// Requested logical CPU.
        cpu: usize,
        /// Number of CPUs the mask can describe.
        capacity: usize,
    },

    /// The operation has no implementation on this platform.
    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),
}

/// Platform capability for reading counters and pinning the calling thread.
pub trait ResourceCounters {
    /// Read the current process counters.
    fn read(&self) -> Result<UsageReading, ProbeError>;

    /// Restrict the calling thread to logical CPU `cpu`.
    fn pin_current_thread(&self, cpu: usize) -> Result<(), ProbeError>;
}

#[cfg(unix)]
fn rusage_self() -> Result<UsageReading, ProbeError> {
    let mut usage = std::mem::MaybeUninit::<libc::rusage>::zeroed();
    // SAFETY: `usage` points to writable storage of the right size.
    let rc = unsafe { libc::getrusage(libc::RUSAGE_SELF, usage.as_mut_ptr()) };
    if rc != 0 {
        return Err(ProbeError::Os {
            call: "getrusage()",
            source: io::Error::last_os_error(),
        });
    }
    // SAFETY: getrusage succeeded, and the zeroed bit pattern is valid anyway.
    let usage = unsafe { usage.assume_init() };
    Ok(UsageReading {
        max_rss: usage.ru_maxrss.max(0) as u64,
        minor_faults: usage.ru_minflt.max(0) as u64,
        major_faults: usage.ru_majflt.max(0) as u64,
    })
}

/// Linux counters: `getrusage` plus `sched_setaffinity`.
#[cfg(target_os = "linux")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LinuxCounters;

#[cfg(target_os = "linux")]
impl ResourceCounters for LinuxCounters {
    fn read(&self) -> Result<UsageReading, ProbeError> {
        rusage_self()
    }

    fn pin_current_thread(&self, cpu: usize) -> Result<(), ProbeError> {
        let capacity = libc::CPU_SETSIZE as usize;
        if cpu >= capacity {
            return Err(ProbeError::CpuOutOfRange { cpu, capacity });
        }
        // SAFETY: cpu_set_t is a plain bitmask for which all-zero is empty,
        // `cpu` is within its capacity, and pid 0 targets the calling thread.
        let rc = unsafe {
            let mut set: libc::cpu_set_t = std::mem::zeroed();
            libc::CPU_SET(cpu, &mut set);
            libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &set)
        };
        if rc != 0 {
            return Err(ProbeError::Os {
                call: "sched_setaffinity()",
                source: io::Error::last_os_error(),
            });
        }
        Ok(())
    }
}

/// Counters for non-Linux Unix systems: `getrusage` only.
#[cfg(all(unix, not(target_os = "linux")))]
#[derive(Debug, Clone, Copy, Default)]
pub struct UnixCounters;

#[cfg(all(unix, not(target_os = "linux")))]
impl ResourceCounters for UnixCounters {
    fn read(&self) -> Result<UsageReading, ProbeError> {
        rusage_self()
    }

    fn pin_current_thread(&self, _cpu: usize) -> Result<(), ProbeError> {
        Err(ProbeError::Unsupported("thread affinity"))
    }
}

/// Fallback for platforms without a counter implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedCounters;

impl ResourceCounters for UnsupportedCounters {
    fn read(&self) -> Result<UsageReading, ProbeError> {
        Err(ProbeError::Unsupported("resource usage"))
    }

    fn pin_current_thread(&self, _cpu: usize) -> Result<(), ProbeError> {
        Err(ProbeError::Unsupported("thread affinity"))
    }
}

/// Counter implementation for the current target.
#[cfg(target_os = "linux")]
pub type PlatformCounters = LinuxCounters;

/// Counter implementation for the current target.
#[cfg(all(unix, not(target_os = "linux")))]
pub type PlatformCounters = UnixCounters;

/// Counter implementation for the current target.
#[cfg(not(unix))]
pub type PlatformCounters = UnsupportedCounters;

/// Takes the begin/end counter readings around a measured run.
#[derive(Debug, Clone, Default)]
pub struct ResourceProbe<C = PlatformCounters> {
    counters: C,
    usage: ResourceUsage,
}

impl ResourceProbe {
    /// Probe backed by the current platform's counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fenced monotonic timestamp, same clock as the measured runs.
    #[inline(always)]
    pub fn now() -> Instant {
        timer::now()
    }
}

impl<C: ResourceCounters> ResourceProbe<C> {
    /// Probe backed by a custom counter implementation.
    pub fn with_counters(counters: C) -> Self {
        Self {
            counters,
            usage: ResourceUsage::default(),
        }
    }

    /// Take the `begin` reading.
    pub fn begin(&mut self) {
        self.usage.begin = self.read_or_zero();
    }

    /// Take the `end` reading.
    pub fn end(&mut self) {
        self.usage.end = self.read_or_zero();
    }

    /// Both readings from the most recent run.
    pub fn usage(&self) -> &ResourceUsage {
        &self.usage
    }

    /// Pin the calling thread to `cpu`, best-effort.
    pub fn pin(&self, cpu: usize) {
        if let Err(err) = self.counters.pin_current_thread(cpu) {
            diagnostics::warn(format_args!("{err}"));
        }
    }

    fn read_or_zero(&self) -> UsageReading {
        match self.counters.read() {
            Ok(reading) => reading,
            Err(err) => {
                diagnostics::warn(format_args!("{err}"));
                UsageReading::default()
            }
        }
    }
}
