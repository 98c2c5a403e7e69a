//! # Guarded Dispatch
//!
//! The call-interception protocol: check the guards, invoke the transport,
//! observe the outcome, and mark caches on qualifying failures.

pub mod dispatcher;
pub mod guard;

pub use dispatcher::GuardedDispatcher;
pub use guard::Guard;
