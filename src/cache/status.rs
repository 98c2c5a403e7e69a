//! # Project Status Cache
//!
//! Bounded concurrent map from project key to the instant its disablement
//! ends. This is the only shared mutable state in the crate.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use tracing::{debug, warn};

use super::options::CacheOptions;
use crate::clock::Clock;

/// Tracks until when a project is considered disabled.
///
/// Entries expire lazily: an expired entry stays in the map (and counts
/// against the capacity) until it is overwritten or evicted. At most
/// `cache_size` entries are retained; past the bound an arbitrary entry is
/// evicted, preferring ones that already expired. No LRU or LFU ordering is
/// promised. All methods are safe to call concurrently without external
/// locking.
#[derive(Debug)]
pub struct ProjectStatusCache {
    name: String,
    lock_end_times: DashMap<String, DateTime<Utc>>,
    default_disabled_time: TimeDelta,
    capacity: usize,
    clock: Arc<dyn Clock>,
}

impl ProjectStatusCache {
    pub fn new(name: impl Into<String>, options: &CacheOptions) -> Self {
        let name = name.into();
        debug!(
            cache = %name,
            cache_size = options.cache_size(),
            default_disabled_time = %options.default_disabled_time(),
            "initializing project status cache"
        );
        Self {
            name,
            lock_end_times: DashMap::new(),
            default_disabled_time: options.default_disabled_time(),
            capacity: options.cache_size(),
            clock: options.clock(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Marks the project disabled for the configured default time.
    pub fn mark_project_disabled(&self, project: &str) {
        self.mark_project_disabled_for(project, self.default_disabled_time);
    }

    /// Marks the project disabled from now until now plus `time`.
    ///
    /// The most recent mark wins unconditionally, whether it lengthens or
    /// shortens the window. A negative `time` is clamped to zero, leaving an
    /// entry that expires at the write instant. The entry may still be
    /// evicted earlier if the cache is over capacity.
    pub fn mark_project_disabled_for(&self, project: &str, time: TimeDelta) {
        let time = if time < TimeDelta::zero() {
            warn!(cache = %self.name, project, "negative disabled time clamped to zero");
            TimeDelta::zero()
        } else {
            time
        };
        warn!(
            cache = %self.name,
            project,
            disabled_time = %time,
            "marking project as disabled"
        );
        if self.capacity == 0 {
            return;
        }
        let lock_end = self.clock.now() + time;
        self.lock_end_times.insert(project.to_string(), lock_end);
        self.enforce_capacity(project);
    }

    /// Reports whether the project is currently marked disabled.
    ///
    /// An entry counts as disabled up to and including its lock-end instant.
    pub fn is_project_disabled(&self, project: &str) -> bool {
        let Some(lock_end) = self.lock_end_times.get(project).map(|entry| *entry.value()) else {
            debug!(cache = %self.name, project, "no cache entry for project");
            return false;
        };
        let disabled = lock_end >= self.clock.now();
        if disabled {
            debug!(cache = %self.name, project, until = %lock_end, "project is marked as disabled");
        } else {
            debug!(cache = %self.name, project, "disablement has expired");
        }
        disabled
    }

    /// Evicts entries until the capacity bound holds again, sparing `keep`.
    fn enforce_capacity(&self, keep: &str) {
        while self.lock_end_times.len() > self.capacity {
            let now = self.clock.now();
            let mut fallback = None;
            let mut victim = None;
            for entry in self.lock_end_times.iter() {
                if entry.key() == keep {
                    continue;
                }
                if *entry.value() < now {
                    victim = Some(entry.key().clone());
                    break;
                }
                if fallback.is_none() {
                    fallback = Some(entry.key().clone());
                }
            }
            let Some(key) = victim.or(fallback) else {
                break;
            };
            debug!(cache = %self.name, project = %key, "evicting entry past capacity");
            self.lock_end_times.remove(&key);
        }
    }
}
