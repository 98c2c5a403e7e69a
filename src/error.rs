//! # Error Types
//!
//! Unified error handling for the guard library. Each concern gets its own
//! enum: configuration problems surface at construction time, classification
//! problems at the completion boundary, and dispatch problems to the caller.

use thiserror::Error;
use tonic::Status;

/// Dispatch operation result type.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Errors raised while validating cache options or guard configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("default disabled time cannot be negative")]
    NegativeDisabledTime,

    #[error("cache size cannot be negative")]
    NegativeCacheSize,

    #[error("guard capability cannot be empty")]
    EmptyCapability,

    #[error("guard trigger reason cannot be empty")]
    EmptyTriggerReason,
}

/// Errors raised while extracting reasons from a failure.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// The status declared structured details but the payload could not be
    /// decoded. A protocol-compatibility problem worth surfacing, unlike the
    /// ordinary no-details case which yields an empty reason set.
    #[error("malformed status details payload: {0}")]
    MalformedDetails(#[from] prost::DecodeError),

    /// The supplied error is not a gRPC status and carries none in its
    /// source chain. A caller bug, not a runtime condition.
    #[error("provided error is not a gRPC status")]
    NotGrpcStatus,
}

/// Errors returned by [`GuardedDispatcher::call`](crate::dispatch::GuardedDispatcher::call).
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A guard reported the project disabled, so the call was rejected before
    /// any network traffic. Not retryable: the backend already said no, and
    /// the local state self-heals once the cache entry expires. Retry
    /// policies must exclude this kind.
    #[error("{capability} is disabled in project {project}. Please enable it and try again after a few minutes.")]
    GateRejected { capability: String, project: String },

    /// The resource name does not carry the expected project/location prefix.
    #[error("resource name {name:?} does not start with projects/<project>/locations/<location>")]
    InvalidResourceName { name: String },

    /// The transport call itself failed; the original status is carried
    /// unmodified.
    #[error(transparent)]
    Call(#[from] Status),
}

impl DispatchError {
    /// True when the call never reached the transport because a guard was
    /// closed.
    #[must_use]
    pub fn is_gate_rejected(&self) -> bool {
        matches!(self, DispatchError::GateRejected { .. })
    }
}

impl From<DispatchError> for Status {
    /// Collapses dispatch errors into the transport's status model.
    ///
    /// Gate rejections use `PERMISSION_DENIED`, matching the code the backend
    /// itself answers with for a disabled project.
    fn from(err: DispatchError) -> Self {
        match err {
            e @ DispatchError::GateRejected { .. } => Status::permission_denied(e.to_string()),
            e @ DispatchError::InvalidResourceName { .. } => Status::invalid_argument(e.to_string()),
            DispatchError::Call(status) => status,
        }
    }
}
