//! Error types for the bundled value sources and for configuration.
//!
//! The aggregators themselves never raise: they return whatever error the
//! value source raised, untouched.

use thiserror::Error;

/// Errors raised by the value sources shipped with this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("index {index} out of range (len {len})")]
    OutOfRange { index: usize, len: usize },

    /// The ring buffer already overwrote this index.
    #[error("index {index} evicted (oldest retained index is {first})")]
    Evicted { index: usize, first: usize },

    #[error("index {index} not yet written (next index is {next})")]
    NotYetWritten { index: usize, next: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("window_size must be >= 1")]
    ZeroWindow,

    #[error("resync_every must be >= 1")]
    ZeroResync,

    #[error("invalid rolling config: {0}")]
    Parse(#[from] toml::de::Error),
}
