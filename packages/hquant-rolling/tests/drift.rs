use core::ops::{Add, Div, Sub};
use hquant_rolling::config::{RollingConfig, RESYNC_EVERY};
use hquant_rolling::indicator::FastSma;
use hquant_rolling::num::Num;

/// Number that rounds badly: every `+`/`-` leaks `ERR` into the result.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Lossy(f64);

const ERR: f64 = 1e-6;

impl Add for Lossy {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Lossy(self.0 + rhs.0 + ERR)
    }
}

impl Sub for Lossy {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Lossy(self.0 - rhs.0 + ERR)
    }
}

impl Div for Lossy {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        Lossy(self.0 / rhs.0)
    }
}

impl Num for Lossy {
    fn zero() -> Self {
        Lossy(0.0)
    }

    fn from_usize(n: usize) -> Self {
        Lossy(n as f64)
    }
}

const W: usize = 10;

fn series(len: usize) -> Vec<Lossy> {
    (0..len).map(|i| Lossy((i % 7) as f64)).collect()
}

fn exact_mean(v: &[Lossy], index: usize) -> f64 {
    let lo = (index + 1).saturating_sub(W);
    let n = (index + 1 - lo) as f64;
    v[lo..=index].iter().map(|x| x.0).sum::<f64>() / n
}

/// Largest |error| of the running sum over `calls` sequential evaluations.
fn max_sum_error(cfg: &RollingConfig, calls: usize) -> f64 {
    let v = series(calls);
    let mut sma = FastSma::with_config(&v, cfg);
    let mut worst: f64 = 0.0;
    for i in 0..calls {
        let mean = sma.evaluate(i).unwrap().0;
        let err = (mean - exact_mean(&v, i)).abs() * (W.min(i + 1) as f64);
        worst = worst.max(err);
    }
    worst
}

#[test]
fn periodic_resync_bounds_drift() {
    let calls = 10 * RESYNC_EVERY;
    let cfg = RollingConfig::new(W).unwrap();
    // A resync costs W additions; each incremental step two operations.
    let bound = ((W + 1) + 2 * RESYNC_EVERY + 2) as f64 * ERR;
    let worst = max_sum_error(&cfg, calls);
    assert!(worst <= bound, "worst={worst} bound={bound}");
}

#[test]
fn drift_grows_without_resync() {
    let calls = 10 * RESYNC_EVERY;
    let cfg = RollingConfig::new(W).unwrap().with_resync_every(None);
    let bound = ((W + 1) + 2 * RESYNC_EVERY + 2) as f64 * ERR;
    let worst = max_sum_error(&cfg, calls);
    assert!(worst > 5.0 * bound, "worst={worst} bound={bound}");
}
