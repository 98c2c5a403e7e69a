//! # Cache Options
//!
//! Immutable options for building a project status cache: how long a project
//! stays marked disabled by default, how many projects are tracked at once,
//! and which clock supplies "now".

use std::sync::Arc;

use chrono::TimeDelta;

use crate::clock::{Clock, SystemClock};
use crate::error::ConfigError;

/// Validated options for a [`ProjectStatusCache`](super::ProjectStatusCache).
#[derive(Debug, Clone)]
pub struct CacheOptions {
    default_disabled_time: TimeDelta,
    cache_size: usize,
    clock: Arc<dyn Clock>,
}

impl CacheOptions {
    /// Default time a project stays marked disabled, in seconds.
    pub const DEFAULT_DISABLED_SECS: i64 = 300;

    /// Default maximum number of projects tracked at once.
    pub const DEFAULT_CACHE_SIZE: usize = 1000;

    pub fn builder() -> CacheOptionsBuilder {
        CacheOptionsBuilder::default()
    }

    pub fn default_disabled_time(&self) -> TimeDelta {
        self.default_disabled_time
    }

    pub fn cache_size(&self) -> usize {
        self.cache_size
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            default_disabled_time: TimeDelta::seconds(Self::DEFAULT_DISABLED_SECS),
            cache_size: Self::DEFAULT_CACHE_SIZE,
            clock: Arc::new(SystemClock),
        }
    }
}

/// Builder for [`CacheOptions`]; `build` validates the combination.
#[derive(Debug, Clone)]
pub struct CacheOptionsBuilder {
    default_disabled_time: TimeDelta,
    cache_size: usize,
    clock: Arc<dyn Clock>,
}

impl Default for CacheOptionsBuilder {
    fn default() -> Self {
        let options = CacheOptions::default();
        Self {
            default_disabled_time: options.default_disabled_time,
            cache_size: options.cache_size,
            clock: options.clock,
        }
    }
}

impl CacheOptionsBuilder {
    pub fn default_disabled_time(mut self, time: TimeDelta) -> Self {
        self.default_disabled_time = time;
        self
    }

    pub fn cache_size(mut self, size: usize) -> Self {
        self.cache_size = size;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Validates the options. The default disabled time must be non-negative;
    /// zero is legal and means marks expire at the instant they are written.
    pub fn build(self) -> Result<CacheOptions, ConfigError> {
        if self.default_disabled_time < TimeDelta::zero() {
            return Err(ConfigError::NegativeDisabledTime);
        }
        Ok(CacheOptions {
            default_disabled_time: self.default_disabled_time,
            cache_size: self.cache_size,
            clock: self.clock,
        })
    }
}
