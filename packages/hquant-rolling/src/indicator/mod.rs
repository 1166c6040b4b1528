//! Rolling-window indicators.
//!
//! - [`FastSma`]: windowed mean, forward-sequential fast path with periodic
//!   resync to bound drift.
//! - [`RollingSum`]: windowed sum, bidirectional seeks plus revision of the
//!   current index.

mod sma;
mod sum;

pub use sma::FastSma;
pub use sum::RollingSum;

/// Indicator evaluated by absolute index.
///
/// Implementations keep mutable running state, so evaluation takes `&mut self`;
/// share one across threads only behind a lock.
pub trait RollingIndicator {
    type Output;
    type Error;

    fn evaluate(&mut self, index: usize) -> Result<Self::Output, Self::Error>;

    fn window_size(&self) -> usize;

    /// Evaluates `0..len` in order, the access pattern the fast paths are
    /// built for.
    fn evaluate_range(&mut self, len: usize) -> Result<Vec<Self::Output>, Self::Error> {
        let mut out = Vec::with_capacity(len);
        for i in 0..len {
            out.push(self.evaluate(i)?);
        }
        Ok(out)
    }
}
