//! # Enablement Cache
//!
//! The cache a guard consults, resolved from [`CacheSettings`]. Enum dispatch
//! keeps the disabled shape a true no-op: it stores nothing and never reports
//! a project disabled.

use std::sync::Arc;

use chrono::TimeDelta;

use super::registry;
use super::settings::CacheSettings;
use super::status::ProjectStatusCache;

/// A guard's view of disablement state.
#[derive(Debug, Clone)]
pub enum EnablementCache {
    /// Backed by a bounded project status cache, owned or shared.
    Standard(Arc<ProjectStatusCache>),
    /// Pass-through used when the guard is disabled.
    NoOp,
}

impl EnablementCache {
    /// Resolves settings into a cache instance.
    ///
    /// `name` identifies the guard dimension; common instances are shared per
    /// name across the process.
    pub fn from_settings(name: &str, settings: &CacheSettings) -> Self {
        if !settings.enabled() {
            return Self::NoOp;
        }
        if settings.use_common_instance() {
            Self::Standard(registry::common_instance(name, settings.options()))
        } else {
            Self::Standard(Arc::new(ProjectStatusCache::new(name, settings.options())))
        }
    }

    /// Marks the project disabled for the cache's default time.
    pub fn mark_project_disabled(&self, project: &str) {
        if let Self::Standard(cache) = self {
            cache.mark_project_disabled(project);
        }
    }

    /// Marks the project disabled for the given time.
    pub fn mark_project_disabled_for(&self, project: &str, time: TimeDelta) {
        if let Self::Standard(cache) = self {
            cache.mark_project_disabled_for(project, time);
        }
    }

    /// Reports whether the project is currently marked disabled.
    pub fn is_project_disabled(&self, project: &str) -> bool {
        match self {
            Self::Standard(cache) => cache.is_project_disabled(project),
            Self::NoOp => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_cache_never_reports_disabled() {
        let cache = EnablementCache::NoOp;
        cache.mark_project_disabled("p");
        cache.mark_project_disabled_for("p", TimeDelta::minutes(10));
        assert!(!cache.is_project_disabled("p"));
    }

    #[test]
    fn disabled_settings_resolve_to_noop() {
        let cache = EnablementCache::from_settings("enablement-test-disabled", &CacheSettings::disabled());
        assert!(matches!(cache, EnablementCache::NoOp));
    }

    #[test]
    fn standalone_settings_resolve_to_private_instances() {
        let a = EnablementCache::from_settings("enablement-test-standalone", &CacheSettings::standalone());
        let b = EnablementCache::from_settings("enablement-test-standalone", &CacheSettings::standalone());
        let (EnablementCache::Standard(a), EnablementCache::Standard(b)) = (&a, &b) else {
            panic!("expected standard caches");
        };
        assert!(!Arc::ptr_eq(a, b));

        a.mark_project_disabled("p");
        assert!(!b.is_project_disabled("p"));
    }

    #[test]
    fn common_settings_resolve_to_the_shared_instance() {
        let a = EnablementCache::from_settings("enablement-test-common", &CacheSettings::common_instance());
        let b = EnablementCache::from_settings("enablement-test-common", &CacheSettings::common_instance());
        let (EnablementCache::Standard(a), EnablementCache::Standard(b)) = (&a, &b) else {
            panic!("expected standard caches");
        };
        assert!(Arc::ptr_eq(a, b));
    }
}
