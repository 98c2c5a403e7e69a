//! # Common Cache Instances
//!
//! Process-wide cache instances, one per guard name, created on first use.
//! Later requests get the existing instance; their fallback options are
//! ignored.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use tracing::debug;

use super::options::CacheOptions;
use super::status::ProjectStatusCache;

static COMMON_INSTANCES: OnceLock<RwLock<HashMap<String, Arc<ProjectStatusCache>>>> =
    OnceLock::new();

fn instances() -> &'static RwLock<HashMap<String, Arc<ProjectStatusCache>>> {
    COMMON_INSTANCES.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Returns the common instance for `name`, creating it with
/// `fallback_options` if it does not exist yet.
pub(crate) fn common_instance(
    name: &str,
    fallback_options: &CacheOptions,
) -> Arc<ProjectStatusCache> {
    if let Some(cache) = instances().read().get(name) {
        return Arc::clone(cache);
    }

    let mut instances = instances().write();
    // Double-check: another thread may have created it between the locks.
    if let Some(cache) = instances.get(name) {
        return Arc::clone(cache);
    }

    debug!(cache = name, "creating common cache instance");
    let cache = Arc::new(ProjectStatusCache::new(name, fallback_options));
    instances.insert(name.to_string(), Arc::clone(&cache));
    cache
}
