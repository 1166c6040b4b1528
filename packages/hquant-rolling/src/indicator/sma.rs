//! Simple moving average over an indexed source.
//!
//! Sequential access (`index == last + 1`) costs two source reads; anything
//! else, and every `resync_every`-th sequential step, resums the whole window.

use super::RollingIndicator;
use crate::config::{RollingConfig, WindowSpec};
use crate::num::Num;
use crate::source::ValueSource;
use crate::state::RollingState;
use crate::window;

#[derive(Debug, Clone)]
pub struct FastSma<N, S> {
    source: S,
    window: WindowSpec,
    resync_every: Option<usize>,
    state: RollingState<N>,
}

impl<N: Num, S: ValueSource<N>> FastSma<N, S> {
    /// Panics if `window_size == 0`; use [`FastSma::with_config`] to handle it.
    pub fn new(source: S, window_size: usize) -> Self {
        assert!(window_size > 0, "window_size must be > 0");
        let window = WindowSpec::new_unchecked(window_size);
        Self::with_config(source, &RollingConfig::for_window(window))
    }

    pub fn with_config(source: S, cfg: &RollingConfig) -> Self {
        Self {
            source,
            window: cfg.window_size,
            resync_every: cfg.resync_every,
            state: RollingState::new(),
        }
    }

    #[inline]
    pub fn window_size(&self) -> usize {
        self.window.size()
    }

    #[inline]
    pub fn state(&self) -> &RollingState<N> {
        &self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the source. The running sum is not revised; values
    /// already inside the window must not change, or the caller must `reset`.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    #[inline]
    fn resync_due(&self) -> bool {
        self.resync_every == Some(self.state.incremental_steps())
    }

    /// Windowed mean ending at `index`.
    ///
    /// Mutates the running state on every call, including repeated calls at the
    /// same index (which always take the exact path). Both reads of a
    /// sequential step happen before the sum is touched, so a failed read
    /// leaves the state as it was and the call can be retried.
    pub fn evaluate(&mut self, index: usize) -> Result<N, S::Error> {
        let w = self.window.size();
        if self.state.is_next(index) && !self.resync_due() {
            let entering = self.source.value_at(index)?;
            let leaving = match index.checked_sub(w) {
                Some(i) => Some(self.source.value_at(i)?),
                None => None,
            };
            self.state.add(entering);
            if let Some(v) = leaving {
                self.state.sub(v);
            }
            self.state.record_step(index);
        } else {
            log::trace!(
                "sma(w={}) resync at index {} (last={:?}, steps={})",
                w,
                index,
                self.state.last_index(),
                self.state.incremental_steps()
            );
            self.state.begin_resync();
            let sum = window::exact_sum(&self.source, index, w)?;
            self.state.finish_resync(index, sum);
        }
        Ok(self.state.running() / N::from_usize(window::effective_window(index, w)))
    }
}

impl<N: Num, S: ValueSource<N>> RollingIndicator for FastSma<N, S> {
    type Output = N;
    type Error = S::Error;

    fn evaluate(&mut self, index: usize) -> Result<N, S::Error> {
        FastSma::evaluate(self, index)
    }

    fn window_size(&self) -> usize {
        FastSma::window_size(self)
    }
}
