//! Window arithmetic shared by the aggregators' exact (resync) paths.

use crate::num::Num;
use crate::source::ValueSource;
use core::ops::RangeInclusive;

/// Trailing window `[max(0, index - window_size + 1), index]`.
#[inline]
pub fn range(index: usize, window_size: usize) -> RangeInclusive<usize> {
    (index + 1).saturating_sub(window_size)..=index
}

/// Number of elements in the trailing window ending at `index`; shrinks near
/// the start of the series instead of padding with zeros.
#[inline]
pub fn effective_window(index: usize, window_size: usize) -> usize {
    window_size.min(index + 1)
}

/// Sums the source over the trailing window, reading every position once.
pub fn exact_sum<N, S>(source: &S, index: usize, window_size: usize) -> Result<N, S::Error>
where
    N: Num,
    S: ValueSource<N> + ?Sized,
{
    let mut sum = N::zero();
    for i in range(index, window_size) {
        sum = sum + source.value_at(i)?;
    }
    Ok(sum)
}
