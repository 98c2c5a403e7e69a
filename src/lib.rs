#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Enablement Guard
//!
//! Client-side guard that stops outbound API calls for projects the backend
//! has reported disabled. A backend that answers "this project's API is not
//! enabled" will keep answering that for a while; without a guard every
//! subsequent call still crosses the network just to collect the same
//! rejection. This crate turns that server-side rejection into a short-lived
//! local decision: mark the project disabled for a few minutes, fail matching
//! calls immediately, and let the state expire on its own.
//!
//! ## Architecture
//!
//! ```text
//! caller ──► GuardedDispatcher::call(resource_name, operation)
//!              ├── names::project_key        projects/<p>/locations/<l>
//!              ├── gate check                Guard ▸ EnablementCache
//!              ├── operation().await         the transport call, external
//!              └── on failure: classify ──►  mark_project_disabled
//! ```
//!
//! Each [`Guard`] is an independent disablement dimension: a capability name,
//! the failure reason that trips it, and an [`EnablementCache`]. Caches are
//! bounded TTL maps with an injected [`Clock`]; they can be private to one
//! client, shared process-wide, or disabled into a no-op.
//!
//! Gate rejections are deliberate backpressure, not transient faults. They
//! surface as [`DispatchError::GateRejected`] (convertible to a
//! `PERMISSION_DENIED` status) and must be excluded from retry policies.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use enablement_guard::{CacheSettings, Guard, GuardedDispatcher};
//! use tonic::Status;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dispatcher = GuardedDispatcher::new(vec![Guard::from_settings(
//!         "Example API",
//!         Guard::SERVICE_DISABLED,
//!         &CacheSettings::common_instance(),
//!     )]);
//!
//!     let run = dispatcher
//!         .call("projects/demo/locations/us/runs/r1", || async {
//!             // Issue the real transport call here.
//!             Ok::<_, Status>("run")
//!         })
//!         .await?;
//!     println!("{run}");
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`cache`] - bounded per-project disablement caches and their settings
//! - [`dispatch`] - the guarded call dispatcher and guard dimensions
//! - [`classify`] - failure reason extraction from gRPC status details
//! - [`names`] - resource name to project key derivation
//! - [`clock`] - injectable time source
//! - [`config`] - serde configuration surface
//! - [`error`] - structured error handling

pub mod cache;
pub mod classify;
pub mod clock;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod names;

pub use cache::{CacheOptions, CacheOptionsBuilder, CacheSettings, EnablementCache, ProjectStatusCache};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{CacheConfig, DispatcherConfig, GuardConfig};
pub use dispatch::{Guard, GuardedDispatcher};
pub use error::{ClassifyError, ConfigError, DispatchError, DispatchResult};
