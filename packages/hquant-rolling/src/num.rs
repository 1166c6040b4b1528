//! Number abstraction used by the rolling aggregators.
//!
//! Rounding behaviour matters here: the incremental paths add and subtract the
//! same values over and over, so any per-operation rounding accumulates.
//!
//! - `f64` / `f32`: IEEE-754 binary floating point, round-half-even on every
//!   `+`/`-`/`/`. Integral values below 2^53 (2^24 for `f32`) add and subtract
//!   exactly; fractional values (0.1, prices) drift.
//! - `rust_decimal::Decimal` (feature `decimal`): 96-bit fixed point, up to 28
//!   significant digits. `+`/`-` are exact while the scale fits; `/` rounds to
//!   28 digits (banker's rounding). The periodic resync mostly matters for the
//!   binary types.

use core::fmt::Debug;
use core::ops::{Add, Div, Sub};

pub trait Num:
    Copy + Debug + PartialEq + Add<Output = Self> + Sub<Output = Self> + Div<Output = Self>
{
    fn zero() -> Self;

    /// Converts a window length (always `>= 1`) into a divisor.
    fn from_usize(n: usize) -> Self;
}

impl Num for f64 {
    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn from_usize(n: usize) -> Self {
        n as f64
    }
}

impl Num for f32 {
    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn from_usize(n: usize) -> Self {
        n as f32
    }
}

#[cfg(feature = "decimal")]
impl Num for rust_decimal::Decimal {
    #[inline]
    fn zero() -> Self {
        rust_decimal::Decimal::ZERO
    }

    #[inline]
    fn from_usize(n: usize) -> Self {
        rust_decimal::Decimal::from(n as u64)
    }
}
