//! Quartiles by Tukey-style "Method 3" interpolation.
//!
//! The median splits the data; the lower and upper quartiles are the medians
//! of each half, with weighted interpolation when the sample count is odd:
//! - `n % 4 == 1`: q1 = 0.25·a[n/4−1] + 0.75·a[n/4], q3 = 0.75·a[3n/4] + 0.25·a[3n/4+1]
//! - `n % 4 == 3`: q1 = 0.75·a[n/4] + 0.25·a[n/4+1], q3 = 0.25·a[3n/4+1] + 0.75·a[3n/4+2]
//!
//! where `n/4` is integer division and `3n/4` means `3·(n/4)`.

/// Median of ascending-sorted data.
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn median_sorted(sorted: &[f64]) -> f64 {
    assert!(!sorted.is_empty(), "Cannot compute median of empty slice");
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) * 0.5
    } else {
        sorted[n / 2]
    }
}

/// Compute `[q1, q2, q3]` from ascending-sorted data.
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn quartiles_sorted(sorted: &[f64]) -> [f64; 3] {
    assert!(!sorted.is_empty(), "Cannot compute quartiles of empty slice");
    let n = sorted.len();
    if n == 1 {
        return [sorted[0]; 3];
    }

    let q2 = median_sorted(sorted);
    let quarter = n / 4;

    let (q1, q3) = if n % 2 == 0 {
        let half = n / 2;
        if n % 4 == 0 {
            (
                (sorted[quarter - 1] + sorted[quarter]) * 0.5,
                (sorted[half + quarter - 1] + sorted[half + quarter]) * 0.5,
            )
        } else {
            (sorted[quarter], sorted[half + quarter])
        }
    } else if n % 4 == 1 {
        (
            sorted[quarter - 1] * 0.25 + sorted[quarter] * 0.75,
            sorted[quarter * 3] * 0.75 + sorted[quarter * 3 + 1] * 0.25,
        )
    } else {
        (
            sorted[quarter] * 0.75 + sorted[quarter + 1] * 0.25,
            sorted[quarter * 3 + 1] * 0.25 + sorted[quarter * 3 + 2] * 0.75,
        )
    };

    [q1, q2, q3]
}

/// Sort a copy of `data` and compute its quartiles.
///
/// # Panics
///
/// Panics if `data` is empty.
pub fn quartiles(data: &[f64]) -> [f64; 3] {
    let mut sorted = data.to_vec();
    sorted.sort_unstable_by(|a, b| a.total_cmp(b));
    quartiles_sorted(&sorted)
}
