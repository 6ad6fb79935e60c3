//! Frozen summary statistics over normalized timing samples.

use serde::{Deserialize, Serialize};

use super::quantile::quartiles_sorted;
use super::summation::KahanSum;

/// Error from building or querying [`Stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StatsError {
    /// No samples were recorded.
    #[error("statistics need at least one sample")]
    Empty,

    /// Quartile index outside `1..=3`.
    #[error("quartile index {0} is out of range (expected 1, 2 or 3)")]
    QuartileOutOfRange(usize),
}

/// Summary of per-invocation timings.
///
/// Built from raw trial durations by dividing each by the inner-loop count
/// and subtracting the baseline offset. All figures are in nanoseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    min: f64,
    max: f64,
    mean: f64,
    /// Unbiased (n − 1) sample variance.
    variance: f64,
    quartiles: [f64; 3],
    len: usize,
}

impl Stats {
    /// Normalize raw trial durations and summarize them.
    ///
    /// Each sample becomes `raw / inner_loops - offset`. An `inner_loops` of
    /// zero produces non-finite statistics.
    pub fn from_samples(raw: &[f64], inner_loops: u64, offset: f64) -> Result<Self, StatsError> {
        let scale = inner_loops as f64;
        let normalized = raw.iter().map(|&s| s / scale - offset).collect();
        Self::from_normalized(normalized)
    }

    /// Summarize values that are already normalized.
    pub fn from_normalized(mut values: Vec<f64>) -> Result<Self, StatsError> {
        if values.is_empty() {
            return Err(StatsError::Empty);
        }
        values.sort_unstable_by(|a, b| a.total_cmp(b));

        let len = values.len();
        let min = values[0];
        let max = values[len - 1];

        if len == 1 {
            return Ok(Self {
                min,
                max,
                mean: min,
                variance: 0.0,
                quartiles: [min; 3],
                len,
            });
        }

        let mean = values.iter().copied().collect::<KahanSum>().sum() / len as f64;

        let squared_deviations = values
            .iter()
            .map(|&v| (v - mean) * (v - mean))
            .collect::<KahanSum>()
            .sum();
        let variance = squared_deviations / (len - 1) as f64;

        Ok(Self {
            min,
            max,
            mean,
            variance,
            quartiles: quartiles_sorted(&values),
            len,
        })
    }

    /// Smallest normalized sample.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Largest normalized sample.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// `max - min`.
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Arithmetic mean, accumulated with compensated summation.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Unbiased sample variance; zero for a single sample.
    pub fn variance(&self) -> f64 {
        self.variance
    }

    /// Square root of [`variance`](Self::variance).
    pub fn stddev(&self) -> f64 {
        self.variance.sqrt()
    }

    /// Same as [`q2`](Self::q2).
    pub fn median(&self) -> f64 {
        self.quartiles[1]
    }

    /// Lower quartile.
    pub fn q1(&self) -> f64 {
        self.quartiles[0]
    }

    /// Median.
    pub fn q2(&self) -> f64 {
        self.quartiles[1]
    }

    /// Upper quartile.
    pub fn q3(&self) -> f64 {
        self.quartiles[2]
    }

    /// Quartile by index: 1, 2 or 3.
    pub fn q(&self, which: usize) -> Result<f64, StatsError> {
        match which {
            1..=3 => Ok(self.quartiles[which - 1]),
            _ => Err(StatsError::QuartileOutOfRange(which)),
        }
    }

    /// Number of samples summarized.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`; a `Stats` cannot be built from zero samples.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_error() {
        assert_eq!(Stats::from_samples(&[], 1, 0.0), Err(StatsError::Empty));
    }

    #[test]
    fn test_single_sample() {
        let stats = Stats::from_samples(&[500.0], 100, 1.0).unwrap();
        assert_eq!(stats.mean(), 4.0);
        assert_eq!(stats.min(), 4.0);
        assert_eq!(stats.max(), 4.0);
        assert_eq!(stats.q1(), 4.0);
        assert_eq!(stats.q2(), 4.0);
        assert_eq!(stats.q3(), 4.0);
        assert_eq!(stats.variance(), 0.0);
        assert_eq!(stats.len(), 1);
    }

    #[test]
    fn test_normalization_divides_then_subtracts() {
        // raw / 10 - 0.5
        let stats = Stats::from_samples(&[40.0, 10.0, 30.0, 20.0], 10, 0.5).unwrap();
        assert_eq!(stats.min(), 0.5);
        assert_eq!(stats.max(), 3.5);
        assert_eq!(stats.mean(), 2.0);
        assert_eq!(stats.range(), 3.0);
    }

    #[test]
    fn test_four_samples() {
        let stats = Stats::from_normalized(vec![4.0, 2.0, 1.0, 3.0]).unwrap();
        assert_eq!(stats.min(), 1.0);
        assert_eq!(stats.max(), 4.0);
        assert_eq!(stats.mean(), 2.5);
        assert_eq!(stats.q1(), 1.5);
        assert_eq!(stats.median(), 2.5);
        assert_eq!(stats.q3(), 3.5);
        // sum of squared deviations 5.0 over n - 1 = 3
        assert!((stats.variance() - 5.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_five_samples() {
        let stats = Stats::from_normalized(vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(stats.q1(), 1.75);
        assert_eq!(stats.q2(), 3.0);
        assert_eq!(stats.q3(), 4.25);
        assert_eq!(stats.variance(), 2.5);
        assert!((stats.stddev() - 2.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_indexed_quartiles() {
        let stats = Stats::from_normalized(vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(stats.q(1), Ok(stats.q1()));
        assert_eq!(stats.q(2), Ok(stats.q2()));
        assert_eq!(stats.q(3), Ok(stats.q3()));
        assert_eq!(stats.q(0), Err(StatsError::QuartileOutOfRange(0)));
        assert_eq!(stats.q(4), Err(StatsError::QuartileOutOfRange(4)));
    }

    #[test]
    fn test_zero_inner_loops_is_not_finite() {
        let stats = Stats::from_samples(&[10.0, 20.0], 0, 0.0).unwrap();
        assert!(!stats.mean().is_finite());
    }
}
