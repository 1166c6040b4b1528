use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Consecutive incremental steps after which [`crate::indicator::FastSma`] forces a
/// full recompute of its running sum.
pub const RESYNC_EVERY: usize = 2000;

/// Trailing window length. Always `>= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct WindowSpec(usize);

impl WindowSpec {
    pub fn new(window_size: usize) -> Result<Self, ConfigError> {
        if window_size == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        Ok(Self(window_size))
    }

    /// Caller guarantees `window_size >= 1`.
    pub(crate) const fn new_unchecked(window_size: usize) -> Self {
        Self(window_size)
    }

    #[inline]
    pub fn size(self) -> usize {
        self.0
    }
}

impl TryFrom<usize> for WindowSpec {
    type Error = ConfigError;

    fn try_from(v: usize) -> Result<Self, Self::Error> {
        Self::new(v)
    }
}

impl From<WindowSpec> for usize {
    fn from(w: WindowSpec) -> Self {
        w.0
    }
}

/// What [`crate::indicator::RollingSum`] does when asked to move further than one
/// window away from its last index.
///
/// Both choices return the same value for a stable source. `Walk` costs
/// `2 * |delta|` source reads, `Recompute` costs `window_size + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JumpPolicy {
    /// Always walk the window edge one position at a time.
    Walk,
    /// Resum the window from scratch when `|delta| >= window_size`.
    #[default]
    Recompute,
}

/// Aggregator configuration.
///
/// ```toml
/// window_size = 20
/// resync_every = 2000
/// jump_policy = "recompute"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollingConfig {
    pub window_size: WindowSpec,
    #[serde(default = "default_resync_every")]
    pub resync_every: Option<usize>,
    #[serde(default)]
    pub jump_policy: JumpPolicy,
}

fn default_resync_every() -> Option<usize> {
    Some(RESYNC_EVERY)
}

impl RollingConfig {
    pub fn new(window_size: usize) -> Result<Self, ConfigError> {
        Ok(Self::for_window(WindowSpec::new(window_size)?))
    }

    pub fn for_window(window_size: WindowSpec) -> Self {
        Self {
            window_size,
            resync_every: default_resync_every(),
            jump_policy: JumpPolicy::default(),
        }
    }

    pub fn with_resync_every(mut self, resync_every: Option<usize>) -> Self {
        self.resync_every = resync_every;
        self
    }

    pub fn with_jump_policy(mut self, jump_policy: JumpPolicy) -> Self {
        self.jump_policy = jump_policy;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resync_every == Some(0) {
            return Err(ConfigError::ZeroResync);
        }
        Ok(())
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(s)?;
        cfg.validate()?;
        log::debug!(
            "loaded rolling config: window_size={} resync_every={:?} jump_policy={:?}",
            cfg.window_size.size(),
            cfg.resync_every,
            cfg.jump_policy
        );
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_window_rejected() {
        assert!(matches!(WindowSpec::new(0), Err(ConfigError::ZeroWindow)));
        assert_eq!(WindowSpec::new(3).unwrap().size(), 3);
    }

    #[test]
    fn toml_defaults() {
        let cfg = RollingConfig::from_toml_str("window_size = 14").unwrap();
        assert_eq!(cfg.window_size.size(), 14);
        assert_eq!(cfg.resync_every, Some(RESYNC_EVERY));
        assert_eq!(cfg.jump_policy, JumpPolicy::Recompute);
    }

    #[test]
    fn toml_overrides() {
        let cfg = RollingConfig::from_toml_str(
            r#"
            window_size = 5
            resync_every = 100
            jump_policy = "walk"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.window_size.size(), 5);
        assert_eq!(cfg.resync_every, Some(100));
        assert_eq!(cfg.jump_policy, JumpPolicy::Walk);
    }

    #[test]
    fn toml_rejects_bad_values() {
        assert!(matches!(
            RollingConfig::from_toml_str("window_size = 0"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            RollingConfig::from_toml_str("window_size = 3\nresync_every = 0"),
            Err(ConfigError::ZeroResync)
        ));
        assert!(matches!(
            RollingConfig::from_toml_str("jump_policy = \"walk\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
