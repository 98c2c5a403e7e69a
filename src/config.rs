//! # Configuration Surface
//!
//! Plain serde structures for wiring guards from file-based configuration.
//! Fields are plain integers (`*_secs`) so the structures stay trivially
//! serializable; conversion into the runtime types validates them. Negative
//! values are representable here and rejected during conversion.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::cache::{CacheOptions, CacheSettings};
use crate::dispatch::{Guard, GuardedDispatcher};
use crate::error::ConfigError;

/// Cache section of a guard configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Turning this off makes the guard a pass-through.
    pub enabled: bool,

    /// Share the process-wide instance instead of owning one.
    pub use_common_instance: bool,

    /// How long a project stays marked disabled, in seconds.
    pub default_disabled_secs: i64,

    /// Maximum number of projects tracked at once.
    pub cache_size: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            use_common_instance: false,
            default_disabled_secs: CacheOptions::DEFAULT_DISABLED_SECS,
            cache_size: CacheOptions::DEFAULT_CACHE_SIZE as i64,
        }
    }
}

impl CacheConfig {
    /// Validates and converts into runtime settings.
    pub fn to_settings(&self) -> Result<CacheSettings, ConfigError> {
        if self.default_disabled_secs < 0 {
            return Err(ConfigError::NegativeDisabledTime);
        }
        if self.cache_size < 0 {
            return Err(ConfigError::NegativeCacheSize);
        }
        if !self.enabled {
            return Ok(CacheSettings::disabled());
        }
        let options = CacheOptions::builder()
            .default_disabled_time(TimeDelta::seconds(self.default_disabled_secs))
            .cache_size(self.cache_size as usize)
            .build()?;
        Ok(if self.use_common_instance {
            CacheSettings::common_instance_with(options)
        } else {
            CacheSettings::standalone_with(options)
        })
    }
}

/// One guard dimension in configuration form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Human-readable capability name. Appears in rejection messages and
    /// keys the common instance.
    pub capability: String,

    /// Failure reason that trips this guard.
    pub trigger_reason: String,

    #[serde(default)]
    pub cache: CacheConfig,
}

impl GuardConfig {
    pub fn to_guard(&self) -> Result<Guard, ConfigError> {
        if self.capability.is_empty() {
            return Err(ConfigError::EmptyCapability);
        }
        if self.trigger_reason.is_empty() {
            return Err(ConfigError::EmptyTriggerReason);
        }
        Ok(Guard::from_settings(
            self.capability.clone(),
            self.trigger_reason.clone(),
            &self.cache.to_settings()?,
        ))
    }
}

/// Full dispatcher configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatcherConfig {
    pub guards: Vec<GuardConfig>,
}

impl DispatcherConfig {
    pub fn to_dispatcher(&self) -> Result<GuardedDispatcher, ConfigError> {
        let guards = self
            .guards
            .iter()
            .map(GuardConfig::to_guard)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(GuardedDispatcher::new(guards))
    }
}
