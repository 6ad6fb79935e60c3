//! Kahan (compensated) summation.
//!
//! Tracks the low-order bits lost at each addition and feeds them back into
//! the next one, keeping the error of a long sum independent of its length.

/// Running compensated sum.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KahanSum {
    sum: f64,
    compensation: f64,
}

impl KahanSum {
    /// Empty sum.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one term.
    #[inline]
    pub fn add(&mut self, value: f64) {
        let y = value - self.compensation;
        let t = self.sum + y;
        self.compensation = (t - self.sum) - y;
        self.sum = t;
    }

    /// Current total.
    #[inline]
    pub fn sum(&self) -> f64 {
        self.sum
    }
}

impl Extend<f64> for KahanSum {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl FromIterator<f64> for KahanSum {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut acc = Self::new();
        acc.extend(iter);
        acc
    }
}

/// Compensated sum of `values`.
pub fn kahan_sum<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    values.into_iter().collect::<KahanSum>().sum()
}
