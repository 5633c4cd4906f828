//! Session configuration parsed from environment variables.

use std::time::Duration;

use crate::consts::{DEFAULT_DEBOUNCE_MS, DEFAULT_RUN_QUEUE_CAPACITY};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("debounce window must be positive (got {0} ms)")]
    ZeroDebounce(u64),
    #[error("run queue capacity must be positive")]
    ZeroQueueCapacity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Quiet window for every debounced shape setter.
    pub debounce: Duration,
    /// Capacity of the bounded run-request queue used by `ChannelSink`.
    pub run_queue_capacity: usize,
}

impl SessionConfig {
    pub fn new(debounce_ms: u64, run_queue_capacity: usize) -> Result<Self, ConfigError> {
        if debounce_ms == 0 {
            return Err(ConfigError::ZeroDebounce(debounce_ms));
        }
        if run_queue_capacity == 0 {
            return Err(ConfigError::ZeroQueueCapacity);
        }
        Ok(Self { debounce: Duration::from_millis(debounce_ms), run_queue_capacity })
    }

    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `RINGMASK_DEBOUNCE_MS`: default 150
    /// - `RINGMASK_RUN_QUEUE_CAPACITY`: default 64
    ///
    /// Unparseable values fall back to the default; zero is rejected.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(
            env_parse("RINGMASK_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS),
            env_parse("RINGMASK_RUN_QUEUE_CAPACITY", DEFAULT_RUN_QUEUE_CAPACITY),
        )
    }

    #[must_use]
    pub fn debounce_ms(&self) -> u64 {
        u64::try_from(self.debounce.as_millis()).unwrap_or(u64::MAX)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            run_queue_capacity: DEFAULT_RUN_QUEUE_CAPACITY,
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
