//! Loop-count configuration for [`Bench`](crate::Bench).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::diagnostics;

/// Environment variable overriding [`Config::inner_loops`].
pub const ENV_INNER_LOOPS: &str = "TIGHTLOOP_INNER_LOOPS";
/// Environment variable overriding [`Config::outer_loops`].
pub const ENV_OUTER_LOOPS: &str = "TIGHTLOOP_OUTER_LOOPS";
/// Environment variable overriding [`Config::offset`].
pub const ENV_OFFSET_NS: &str = "TIGHTLOOP_OFFSET_NS";

/// Configuration options for a sampling run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Workload invocations per trial (default: 100,000).
    ///
    /// Each raw sample is divided by this to get a per-invocation figure.
    pub inner_loops: u64,

    /// Trials per run, one raw sample each (default: 23).
    pub outer_loops: u32,

    /// Baseline in nanoseconds subtracted from every normalized sample
    /// (default: 0.0).
    pub offset: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inner_loops: 100_000,
            outer_loops: 23,
            offset: 0.0,
        }
    }
}

impl Config {
    /// Reduced loop counts for smoke tests and CI.
    ///
    /// Settings:
    /// - 1,000 inner loops (vs 100,000 default)
    /// - 11 outer loops (vs 23 default)
    pub fn quick() -> Self {
        Self {
            inner_loops: 1_000,
            outer_loops: 11,
            ..Self::default()
        }
    }

    /// Apply overrides from the environment on top of `default`.
    ///
    /// Reads `TIGHTLOOP_INNER_LOOPS`, `TIGHTLOOP_OUTER_LOOPS` and
    /// `TIGHTLOOP_OFFSET_NS`. Unset variables keep the default; unparsable
    /// ones keep it too and leave a diagnostic on stderr.
    pub fn from_env_or(default: Self) -> Self {
        Self::from_lookup(default, |key| std::env::var(key).ok())
    }

    fn from_lookup<L>(default: Self, lookup: L) -> Self
    where
        L: Fn(&str) -> Option<String>,
    {
        Self {
            inner_loops: parse_override(&lookup, ENV_INNER_LOOPS, default.inner_loops),
            outer_loops: parse_override(&lookup, ENV_OUTER_LOOPS, default.outer_loops),
            offset: parse_override(&lookup, ENV_OFFSET_NS, default.offset),
        }
    }
}

fn parse_override<T, L>(lookup: &L, key: &str, default: T) -> T
where
    T: FromStr,
    L: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                diagnostics::warn(format_args!(
                    "ignoring {key}={raw:?}: not a valid value, keeping the default"
                ));
                default
            }
        },
    }
}
