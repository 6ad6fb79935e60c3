//! Statistical reduction of timing samples.
//!
//! This module provides:
//! - Compensated (Kahan) summation for means and variances
//! - Method 3 quartile interpolation
//! - [`Stats`], the frozen summary cached by [`Bench`](crate::Bench)

mod quantile;
mod stats;
mod summation;

pub use quantile::{median_sorted, quartiles, quartiles_sorted};
pub use stats::{Stats, StatsError};
pub use summation::{kahan_sum, KahanSum};
