//! Bounded-integer sampling for synthesizing benchmark inputs.
//!
//! [`BitmaskSampler`] draws uniformly from `[lo, hi]` by rejection: it masks
//! each raw draw down to the smallest all-ones bit pattern covering the range
//! width and retries until the masked value fits. The expected number of
//! draws is below two. Drive it with a seeded generator such as
//! `rand_xoshiro::Xoshiro128StarStar` for reproducible inputs.
//!
//! This module is independent of the timing core; generate inputs before a
//! run, not inside the measured workload.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro128StarStar;
//! use tightloop::sampler::BitmaskSampler;
//!
//! let mut rng = Xoshiro128StarStar::seed_from_u64(0x2323);
//! let dice = BitmaskSampler::new(1i32, 6).unwrap();
//! let rolls: Vec<i32> = (0..100).map(|_| dice.draw(&mut rng)).collect();
//! assert!(rolls.iter().all(|r| (1..=6).contains(r)));
//! ```

use std::fmt;

use rand::distr::Distribution;
use rand::{Rng, RngCore};

/// Error from [`BitmaskSampler::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SamplerError {
    /// `lo` is greater than `hi`.
    #[error("empty range: lower bound exceeds upper bound")]
    EmptyRange,
}

mod sealed {
    pub trait Sealed {}
}

/// Integer types [`BitmaskSampler`] can produce.
pub trait BitmaskInt: sealed::Sealed + Copy + PartialOrd + fmt::Debug {
    /// Unsigned type of the same width holding `hi - lo`.
    type Width: Copy + PartialOrd + fmt::Debug;

    #[doc(hidden)]
    const ZERO_WIDTH: Self::Width;

    #[doc(hidden)]
    fn width(lo: Self, hi: Self) -> Self::Width;

    #[doc(hidden)]
    fn mask(width: Self::Width) -> Self::Width;

    #[doc(hidden)]
    fn draw_masked<R: RngCore + ?Sized>(rng: &mut R, mask: Self::Width) -> Self::Width;

    #[doc(hidden)]
    fn offset_by(lo: Self, x: Self::Width) -> Self;
}

macro_rules! impl_bitmask_int {
    ($int:ty, $width:ty, $next:ident) => {
        impl sealed::Sealed for $int {}

        impl BitmaskInt for $int {
            type Width = $width;

            const ZERO_WIDTH: $width = 0;

            #[inline]
            fn width(lo: Self, hi: Self) -> $width {
                hi.wrapping_sub(lo) as $width
            }

            #[inline]
            fn mask(width: $width) -> $width {
                // width != 0, so the shift is below the bit width
                <$width>::MAX >> width.leading_zeros()
            }

            #[inline]
            fn draw_masked<R: RngCore + ?Sized>(rng: &mut R, mask: $width) -> $width {
                (rng.$next() as $width) & mask
            }

            #[inline]
            fn offset_by(lo: Self, x: $width) -> Self {
                lo.wrapping_add(x as $int)
            }
        }
    };
}

impl_bitmask_int!(i32, u32, next_u32);
impl_bitmask_int!(u32, u32, next_u32);
impl_bitmask_int!(i64, u64, next_u64);
impl_bitmask_int!(u64, u64, next_u64);

/// Uniform sampler over the inclusive range `[lo, hi]`.
#[derive(Debug, Clone, Copy)]
pub struct BitmaskSampler<I: BitmaskInt> {
    lo: I,
    hi: I,
    width: I::Width,
    mask: I::Width,
}

impl<I: BitmaskInt> BitmaskSampler<I> {
    /// Sampler for `[lo, hi]`. A single-value range (`lo == hi`) is allowed.
    pub fn new(lo: I, hi: I) -> Result<Self, SamplerError> {
        if lo > hi {
            return Err(SamplerError::EmptyRange);
        }
        let width = I::width(lo, hi);
        let mask = if width == I::ZERO_WIDTH {
            I::ZERO_WIDTH
        } else {
            I::mask(width)
        };
        Ok(Self { lo, hi, width, mask })
    }

    /// Draw one value.
    #[inline]
    pub fn draw<R: RngCore + ?Sized>(&self, rng: &mut R) -> I {
        if self.width == I::ZERO_WIDTH {
            return self.lo;
        }
        loop {
            let x = I::draw_masked(rng, self.mask);
            if x <= self.width {
                return I::offset_by(self.lo, x);
            }
        }
    }

    /// Inclusive lower bound.
    pub fn low(&self) -> I {
        self.lo
    }

    /// Inclusive upper bound.
    pub fn high(&self) -> I {
        self.hi
    }
}

impl<I: BitmaskInt> Distribution<I> for BitmaskSampler<I> {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> I {
        self.draw(rng)
    }
}
