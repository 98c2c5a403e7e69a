//! # Cache Settings
//!
//! Settings pick the deployment shape of a guard's cache: disabled outright,
//! a process-wide common instance shared by every client that opts in, or a
//! standalone instance owned by one client.

use super::options::CacheOptions;

/// Deployment settings for an enablement cache.
#[derive(Debug, Clone)]
pub struct CacheSettings {
    enabled: bool,
    use_common_instance: bool,
    options: CacheOptions,
}

impl CacheSettings {
    /// Disables the guard entirely; the resolved cache never reports anything
    /// disabled.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            use_common_instance: false,
            options: CacheOptions::default(),
        }
    }

    /// Shares the process-wide instance, creating it with default options if
    /// it does not exist yet.
    pub fn common_instance() -> Self {
        Self::common_instance_with(CacheOptions::default())
    }

    /// Shares the process-wide instance. `fallback_options` apply only if
    /// this caller is the one that creates it; an existing instance keeps the
    /// options it was created with.
    pub fn common_instance_with(fallback_options: CacheOptions) -> Self {
        Self {
            enabled: true,
            use_common_instance: true,
            options: fallback_options,
        }
    }

    /// Uses a private instance with default options.
    pub fn standalone() -> Self {
        Self::standalone_with(CacheOptions::default())
    }

    /// Uses a private instance with the given options.
    pub fn standalone_with(options: CacheOptions) -> Self {
        Self {
            enabled: true,
            use_common_instance: false,
            options,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn use_common_instance(&self) -> bool {
        self.use_common_instance
    }

    pub fn options(&self) -> &CacheOptions {
        &self.options
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self::common_instance()
    }
}
