//! # Guard Dimensions
//!
//! One guard is one independent disablement dimension: the capability it
//! protects, the failure reason that trips it, and the cache that remembers
//! the state. The dispatcher treats guards uniformly, so adding a dimension
//! is just another entry in the list.

use crate::cache::{CacheSettings, EnablementCache};

/// A single disablement dimension.
#[derive(Debug, Clone)]
pub struct Guard {
    capability: String,
    trigger_reason: String,
    cache: EnablementCache,
}

impl Guard {
    /// Reason the backend attaches when the API is not enabled for the
    /// project.
    pub const SERVICE_DISABLED: &'static str = "SERVICE_DISABLED";

    pub fn new(
        capability: impl Into<String>,
        trigger_reason: impl Into<String>,
        cache: EnablementCache,
    ) -> Self {
        Self {
            capability: capability.into(),
            trigger_reason: trigger_reason.into(),
            cache,
        }
    }

    /// Builds a guard whose cache is resolved from settings, using the
    /// capability name as the common-instance key.
    pub fn from_settings(
        capability: impl Into<String>,
        trigger_reason: impl Into<String>,
        settings: &CacheSettings,
    ) -> Self {
        let capability = capability.into();
        let cache = EnablementCache::from_settings(&capability, settings);
        Self {
            capability,
            trigger_reason: trigger_reason.into(),
            cache,
        }
    }

    /// Human-readable name of the capability this guard protects. Appears in
    /// gate-rejection messages.
    pub fn capability(&self) -> &str {
        &self.capability
    }

    /// Failure reason that marks this guard's cache.
    pub fn trigger_reason(&self) -> &str {
        &self.trigger_reason
    }

    pub fn cache(&self) -> &EnablementCache {
        &self.cache
    }
}
