use crate::num::Num;
use core::cmp::Ordering;
use serde::Serialize;

/// Move from the last evaluated index to a requested one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Seek {
    Same,
    Forward(usize),
    Backward(usize),
}

/// Drift-correction state machine.
///
/// `Resynchronizing` is entered whenever the running sum is about to be
/// rebuilt from the source, and left as soon as the rebuild completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Incremental,
    Resynchronizing,
}

/// Running aggregate plus the bookkeeping the update policies need.
///
/// Invariant after a successful evaluation: `running` is the sum of the source
/// over `window::range(last_index, window_size)`, up to accumulated rounding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollingState<N> {
    last_index: Option<usize>,
    running: N,
    incremental_steps: usize,
    contribution: Option<N>,
    phase: Phase,
}

impl<N: Num> Default for RollingState<N> {
    fn default() -> Self {
        Self {
            last_index: None,
            running: N::zero(),
            incremental_steps: 0,
            contribution: None,
            phase: Phase::Incremental,
        }
    }
}

impl<N: Num> RollingState<N> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn last_index(&self) -> Option<usize> {
        self.last_index
    }

    #[inline]
    pub fn running(&self) -> N {
        self.running
    }

    /// Incremental steps applied since the last full recompute.
    #[inline]
    pub fn incremental_steps(&self) -> usize {
        self.incremental_steps
    }

    /// Value most recently contributed for `last_index`, if recorded.
    #[inline]
    pub fn contribution(&self) -> Option<N> {
        self.contribution
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Direction and distance from the last evaluated index; `None` counts
    /// as `-1`.
    #[inline]
    pub(crate) fn seek_to(&self, index: usize) -> Seek {
        match self.last_index {
            None => Seek::Forward(index.saturating_add(1)),
            Some(last) => match index.cmp(&last) {
                Ordering::Equal => Seek::Same,
                Ordering::Greater => Seek::Forward(index - last),
                Ordering::Less => Seek::Backward(last - index),
            },
        }
    }

    /// True iff `index` directly follows the last evaluated index.
    #[inline]
    pub(crate) fn is_next(&self, index: usize) -> bool {
        self.seek_to(index) == Seek::Forward(1)
    }

    #[inline]
    pub(crate) fn add(&mut self, v: N) {
        self.running = self.running + v;
    }

    #[inline]
    pub(crate) fn sub(&mut self, v: N) {
        self.running = self.running - v;
    }

    #[inline]
    pub(crate) fn record_step(&mut self, index: usize) {
        self.incremental_steps += 1;
        self.last_index = Some(index);
    }

    #[inline]
    pub(crate) fn begin_resync(&mut self) {
        self.phase = Phase::Resynchronizing;
    }

    /// Installs an exactly recomputed sum and returns to `Incremental`.
    #[inline]
    pub(crate) fn finish_resync(&mut self, index: usize, sum: N) {
        self.running = sum;
        self.incremental_steps = 0;
        self.last_index = Some(index);
        self.phase = Phase::Incremental;
    }

    #[inline]
    pub(crate) fn set_last_index(&mut self, index: usize) {
        self.last_index = Some(index);
    }

    #[inline]
    pub(crate) fn set_contribution(&mut self, v: N) {
        self.contribution = Some(v);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
