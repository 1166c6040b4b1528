//! Windowed sum that can seek in both directions and absorb revisions of the
//! value at its current index.
//!
//! Moving from `last` to `index` walks the window edge one position at a time.
//! A forward step adds the entering value and drops the one falling out of the
//! window; a backward step applies the exact inverse, so the sum returns to
//! what it was when the window last stood at the earlier position.

use super::RollingIndicator;
use crate::config::{JumpPolicy, RollingConfig, WindowSpec};
use crate::num::Num;
use crate::source::ValueSource;
use crate::state::{RollingState, Seek};
use crate::window;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone)]
pub struct RollingSum<N, S> {
    source: S,
    window: WindowSpec,
    jump_policy: JumpPolicy,
    state: RollingState<N>,
}

impl<N: Num, S: ValueSource<N>> RollingSum<N, S> {
    /// Panics if `window_size == 0`; use [`RollingSum::with_config`] to handle it.
    pub fn new(source: S, window_size: usize) -> Self {
        assert!(window_size > 0, "window_size must be > 0");
        let window = WindowSpec::new_unchecked(window_size);
        Self::with_config(source, &RollingConfig::for_window(window))
    }

    pub fn with_config(source: S, cfg: &RollingConfig) -> Self {
        Self {
            source,
            window: cfg.window_size,
            jump_policy: cfg.jump_policy,
            state: RollingState::new(),
        }
    }

    #[inline]
    pub fn window_size(&self) -> usize {
        self.window.size()
    }

    #[inline]
    pub fn jump_policy(&self) -> JumpPolicy {
        self.jump_policy
    }

    #[inline]
    pub fn state(&self) -> &RollingState<N> {
        &self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the source. Only the value at the current index may
    /// change before the next call at that same index picks it up.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Windowed sum ending at `index` (not divided by the window length).
    ///
    /// A failed source read may leave part of a walk applied; the aggregator
    /// must then be `reset` before further use.
    pub fn evaluate(&mut self, index: usize) -> Result<N, S::Error> {
        let w = self.window.size();
        match self.state.seek_to(index) {
            Seek::Same => self.revise(index)?,
            Seek::Forward(steps) | Seek::Backward(steps)
                if self.jump_policy == JumpPolicy::Recompute && steps >= w =>
            {
                self.recompute(index)?
            }
            Seek::Forward(_) => {
                let base = self.state.last_index().map_or(0, |l| l + 1);
                let mut entered = N::zero();
                for edge in base..=index {
                    entered = self.step(edge, Direction::Forward)?;
                }
                self.state.set_contribution(entered);
            }
            Seek::Backward(steps) => {
                // Undo the forward steps that moved the edge from `index` to `last`.
                let last = index + steps;
                for edge in (index + 1..=last).rev() {
                    self.step(edge, Direction::Backward)?;
                }
                let current = self.source.value_at(index)?;
                self.state.set_contribution(current);
            }
        }

        self.state.set_last_index(index);
        Ok(self.state.running())
    }

    /// Moves the window edge across `edge` in `dir`.
    ///
    /// Both reads happen before the sum is touched. Returns the value at `edge`.
    fn step(&mut self, edge: usize, dir: Direction) -> Result<N, S::Error> {
        let w = self.window.size();
        let at_edge = self.source.value_at(edge)?;
        let trailing = match edge.checked_sub(w) {
            Some(i) => Some(self.source.value_at(i)?),
            None => None,
        };
        match dir {
            Direction::Forward => {
                self.state.add(at_edge);
                if let Some(v) = trailing {
                    self.state.sub(v);
                }
            }
            Direction::Backward => {
                self.state.sub(at_edge);
                if let Some(v) = trailing {
                    self.state.add(v);
                }
            }
        }
        Ok(at_edge)
    }

    /// Same index again: swap the recorded contribution for a fresh read.
    fn revise(&mut self, index: usize) -> Result<(), S::Error> {
        let Some(stale) = self.state.contribution() else {
            return Ok(());
        };
        let fresh = self.source.value_at(index)?;
        self.state.sub(stale);
        self.state.add(fresh);
        self.state.set_contribution(fresh);
        Ok(())
    }

    fn recompute(&mut self, index: usize) -> Result<(), S::Error> {
        let w = self.window.size();
        log::trace!(
            "sum(w={}) jump {:?} -> {} recomputes window",
            w,
            self.state.last_index(),
            index
        );
        self.state.begin_resync();
        let current = self.source.value_at(index)?;
        // Everything in the window except `index` itself.
        let earlier = match index.checked_sub(1) {
            Some(prev) if w > 1 => window::exact_sum(&self.source, prev, w - 1)?,
            _ => N::zero(),
        };
        self.state.finish_resync(index, earlier + current);
        self.state.set_contribution(current);
        Ok(())
    }
}

impl<N: Num, S: ValueSource<N>> RollingIndicator for RollingSum<N, S> {
    type Output = N;
    type Error = S::Error;

    fn evaluate(&mut self, index: usize) -> Result<N, S::Error> {
        RollingSum::evaluate(self, index)
    }

    fn window_size(&self) -> usize {
        RollingSum::window_size(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceError;
    use crate::source::FnSource;
    use std::cell::Cell;

    /// Slice source that counts every read.
    fn counted<'a>(
        v: &'a [f64],
        reads: &'a Cell<usize>,
    ) -> FnSource<impl Fn(usize) -> Result<f64, SourceError> + 'a> {
        FnSource(move |i: usize| {
            reads.set(reads.get() + 1);
            v.value_at(i)
        })
    }

    fn walking<S: ValueSource<f64>>(source: S, w: usize) -> RollingSum<f64, S> {
        let cfg = RollingConfig::new(w)
            .unwrap()
            .with_jump_policy(JumpPolicy::Walk);
        RollingSum::with_config(source, &cfg)
    }

    fn brute_sum(v: &[f64], index: usize, w: usize) -> f64 {
        v[window::range(index, w)].iter().sum()
    }

    #[test]
    fn backward_reevaluation() {
        let v = vec![1.0; 10];
        let mut walk = walking(&v, 3);
        assert_eq!(walk.evaluate(5), Ok(3.0));
        assert_eq!(walk.evaluate(2), Ok(3.0));
        assert_eq!(walk.evaluate(5), Ok(3.0));

        let mut jump = RollingSum::new(&v, 3);
        assert_eq!(jump.evaluate(5), Ok(3.0));
        assert_eq!(jump.evaluate(2), Ok(3.0));
        assert_eq!(jump.evaluate(5), Ok(3.0));
    }

    #[test]
    fn revision_replaces_stale_contribution() {
        let v: Vec<f64> = vec![1.0, 2.0, 3.0, 4.0, 10.0, 6.0];
        for policy in [JumpPolicy::Walk, JumpPolicy::Recompute] {
            let cfg = RollingConfig::new(3).unwrap().with_jump_policy(policy);
            let mut sum = RollingSum::with_config(v.clone(), &cfg);
            let before = sum.evaluate(4).unwrap();
            assert_eq!(before, 3.0 + 4.0 + 10.0);
            assert_eq!(sum.state().contribution(), Some(10.0));

            sum.source_mut()[4] = 20.0;
            let after = sum.evaluate(4).unwrap();
            assert_eq!(after - before, 10.0, "{policy:?}");
            assert_eq!(sum.state().contribution(), Some(20.0));

            // The revised value carries forward.
            assert_eq!(sum.evaluate(5), Ok(4.0 + 20.0 + 6.0));
        }
    }

    #[test]
    fn revision_after_backward_walk() {
        let mut v: Vec<f64> = (0..8).map(f64::from).collect();
        let mut sum = walking(v.clone(), 3);
        sum.evaluate(6).unwrap();
        assert_eq!(sum.evaluate(4), Ok(2.0 + 3.0 + 4.0));
        assert_eq!(sum.state().contribution(), Some(4.0));
        v[4] = 40.0;
        *sum.source_mut() = v;
        assert_eq!(sum.evaluate(4), Ok(2.0 + 3.0 + 40.0));
    }

    #[test]
    fn walk_matches_brute_force_in_both_directions() {
        let v: Vec<f64> = (0..40).map(|i| ((i * 13) % 17) as f64 - 8.0).collect();
        for w in [1usize, 2, 3, 7, 40, 55] {
            let mut walk = walking(&v, w);
            let mut jump = RollingSum::new(&v, w);
            for &i in &[0usize, 3, 1, 1, 20, 39, 38, 12, 0, 25, 26, 27, 5] {
                let expected = brute_sum(&v, i, w);
                assert_eq!(walk.evaluate(i), Ok(expected), "walk w={w} i={i}");
                assert_eq!(jump.evaluate(i), Ok(expected), "jump w={w} i={i}");
            }
        }
    }

    #[test]
    fn backward_to_origin() {
        let v = vec![2.0, 4.0, 8.0, 16.0];
        let mut sum = walking(&v, 2);
        assert_eq!(sum.evaluate(3), Ok(24.0));
        assert_eq!(sum.evaluate(0), Ok(2.0));
        assert_eq!(sum.evaluate(1), Ok(6.0));
    }

    #[test]
    fn jump_policy_short_circuits_long_seeks() {
        let v: Vec<f64> = (0..100).map(f64::from).collect();
        let reads = Cell::new(0usize);
        let mut sum = RollingSum::new(counted(&v, &reads), 4);
        assert_eq!(sum.jump_policy(), JumpPolicy::Recompute);
        assert_eq!(sum.evaluate(2), Ok(3.0));
        assert_eq!(reads.replace(0), 3);

        // The current value plus the three before it.
        assert_eq!(sum.evaluate(90), Ok(87.0 + 88.0 + 89.0 + 90.0));
        assert_eq!(reads.replace(0), 4);

        // One short of the window still walks: two reads per step.
        assert_eq!(sum.evaluate(93), Ok(90.0 + 91.0 + 92.0 + 93.0));
        assert_eq!(reads.replace(0), 6);

        assert_eq!(sum.evaluate(97), Ok(94.0 + 95.0 + 96.0 + 97.0));
        assert_eq!(reads.replace(0), 4);
        assert_eq!(sum.evaluate(93), Ok(90.0 + 91.0 + 92.0 + 93.0));
        assert_eq!(reads.replace(0), 4);

        // Backward walk reads the new current value once more at the end.
        assert_eq!(sum.evaluate(90), Ok(87.0 + 88.0 + 89.0 + 90.0));
        assert_eq!(reads.replace(0), 7);
    }

    #[test]
    fn walk_policy_pays_per_step() {
        let v: Vec<f64> = (0..100).map(f64::from).collect();
        let reads = Cell::new(0usize);
        let mut sum = walking(counted(&v, &reads), 4);
        assert_eq!(sum.evaluate(2), Ok(3.0));
        reads.set(0);

        assert_eq!(sum.evaluate(90), Ok(87.0 + 88.0 + 89.0 + 90.0));
        // Edge 3 has nothing leaving the window yet; 4..=90 read twice each.
        assert_eq!(reads.get(), 1 + 2 * 87);
    }

    #[test]
    fn source_errors_propagate() {
        let v = vec![1.0, 2.0, 3.0];
        let mut sum = walking(&v, 2);
        assert_eq!(sum.evaluate(2), Ok(5.0));
        assert_eq!(
            sum.evaluate(3),
            Err(SourceError::OutOfRange { index: 3, len: 3 })
        );
        // Read failed before the sum was touched.
        assert_eq!(sum.state().running(), 5.0);
        assert_eq!(sum.state().last_index(), Some(2));
    }
}
