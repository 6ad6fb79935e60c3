//! # tightloop
//!
//! Micro-benchmark harness with fenced timing loops and robust summaries.
//!
//! A [`Bench`] runs a workload `inner_loops` times back-to-back per trial for
//! `outer_loops` trials, records one elapsed time per trial and reduces the
//! per-invocation figures to [`Stats`]: min, max, compensated mean, unbiased
//! variance and Method 3 quartiles. A [`Oneshot`] times a single call of a
//! workload too expensive or too side-effectful to repeat. Both read the
//! process resource counters (peak RSS, page faults) before and after.
//!
//! ## Keep results alive
//!
//! Every workload result passes through [`do_not_optimize_away`]. Values the
//! workload mutates through captures need a [`touch`](Bench::touch) (or the
//! [`touch!`] macro) after the run, otherwise the optimizer may prove the
//! loop body dead:
//!
//! ```
//! use tightloop::Bench;
//!
//! let mut acc = 0u64;
//! let mut bench = Bench::new();
//! bench.i(1_000).o(5).run("accumulate", || acc = acc.wrapping_mul(31).wrapping_add(7));
//! bench.touch(&acc);
//! println!("{:.2} ns/call", bench.average());
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use tightloop::{Bench, Config};
//!
//! let input: Vec<u32> = (0..64).collect();
//! let mut bench = Bench::with_config(Config::quick());
//! bench.calibrate_offset();
//! bench.run("sum", || input.iter().sum::<u32>());
//!
//! let stats = bench.stats();
//! assert!(stats.q1() <= stats.median() && stats.median() <= stats.q3());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod bench;
mod config;
mod oneshot;
mod result;

// Functional modules
pub mod diagnostics;
pub mod measurement;
pub mod output;
pub mod sampler;
pub mod statistics;

// Re-exports for public API
pub use bench::Bench;
pub use config::{Config, ENV_INNER_LOOPS, ENV_OFFSET_NS, ENV_OUTER_LOOPS};
pub use measurement::{do_not_optimize_away, ResourceUsage, UsageReading};
pub use oneshot::Oneshot;
pub use result::BenchSummary;
pub use statistics::{Stats, StatsError};

/// Apply [`do_not_optimize_away`] to every argument.
///
/// ```
/// let (a, b) = (1u8, String::from("b"));
/// tightloop::touch!(a, b);
/// ```
#[macro_export]
macro_rules! touch {
    ($($value:expr),+ $(,)?) => {{
        $( $crate::measurement::do_not_optimize_away(&$value); )+
    }};
}
