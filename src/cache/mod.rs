//! # Project Disablement Caches
//!
//! Bounded, time-limited per-project disablement state and the settings that
//! shape it.
//!
//! ```text
//! EnablementCache (enum)              <- what a guard consults
//!   ├── Standard(ProjectStatusCache)  <- bounded TTL map, owned or shared
//!   └── NoOp                          <- guard disabled, never reports anything
//! ```
//!
//! A cache lives for its owner's lifetime; there is nothing to tear down.
//! Common instances are shared per guard name across the whole process.

pub mod enablement;
pub mod options;
mod registry;
pub mod settings;
pub mod status;

pub use enablement::EnablementCache;
pub use options::{CacheOptions, CacheOptionsBuilder};
pub use settings::CacheSettings;
pub use status::ProjectStatusCache;
