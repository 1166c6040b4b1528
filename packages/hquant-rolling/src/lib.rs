//! Incremental rolling-window aggregates over indexed value sources.
//!
//! Values are requested by absolute index, possibly out of order and possibly
//! more than once. The aggregators keep a running sum so the common access
//! patterns cost O(1) per call instead of O(window):
//!
//! - [`indicator::FastSma`]: mean; sequential fast path, full resync every
//!   [`config::RESYNC_EVERY`] steps to bound floating-point drift.
//! - [`indicator::RollingSum`]: sum; walks the window edge forward or backward
//!   and absorbs revisions of the value at the current index.
//!
//! Aggregators are single-owner (`&mut self`) and do no locking.

pub mod num;
pub mod error;
pub mod config;
pub mod source;
pub mod window;
pub mod state;

pub mod circular;
pub mod bars;

pub mod indicator;

pub use config::{JumpPolicy, RollingConfig, WindowSpec, RESYNC_EVERY};
pub use error::{ConfigError, SourceError};
pub use indicator::{FastSma, RollingIndicator, RollingSum};
pub use num::Num;
pub use source::{FnSource, ValueSource};
