//! # Guarded Call Dispatch
//!
//! Gates every outbound call through the configured guards and feeds
//! qualifying failures back into their caches.

use std::future::Future;

use tonic::Status;
use tracing::{debug, error};

use super::guard::Guard;
use crate::classify;
use crate::error::{DispatchError, DispatchResult};
use crate::names;

/// Dispatches outbound calls through a list of guards.
///
/// The gate check runs before the transport is touched; the completion
/// observation runs inline once the call finishes and only mutates the
/// in-memory caches. Calls already in flight when a mark lands are not
/// affected; only later dispatches observe the new state.
#[derive(Debug, Clone, Default)]
pub struct GuardedDispatcher {
    guards: Vec<Guard>,
}

impl GuardedDispatcher {
    pub fn new(guards: Vec<Guard>) -> Self {
        Self { guards }
    }

    pub fn guards(&self) -> &[Guard] {
        &self.guards
    }

    /// Dispatches one outbound call for `resource_name`.
    ///
    /// Rejects with [`DispatchError::GateRejected`] before invoking
    /// `operation` when any guard reports the project disabled; the rejection
    /// is issued before the first await point and nothing is retried. On a
    /// transport failure the original status is returned unmodified, wrapped
    /// as [`DispatchError::Call`], after each guard whose trigger reason the
    /// failure carries has marked its cache.
    pub async fn call<F, Fut, T>(&self, resource_name: &str, operation: F) -> DispatchResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, Status>>,
    {
        let project = names::project_key(resource_name)?;
        for guard in &self.guards {
            if guard.cache().is_project_disabled(&project) {
                debug!(
                    resource = resource_name,
                    project = %project,
                    capability = guard.capability(),
                    "rejecting call for disabled project"
                );
                return Err(DispatchError::GateRejected {
                    capability: guard.capability().to_string(),
                    project,
                });
            }
        }

        let result = operation().await;
        match &result {
            Ok(_) => debug!(resource = resource_name, "call completed"),
            Err(status) => {
                error!(
                    resource = resource_name,
                    code = ?status.code(),
                    message = status.message(),
                    "call failed"
                );
                self.observe_failure(&project, status);
            }
        }
        result.map_err(DispatchError::Call)
    }

    /// Marks every guard whose trigger reason the failure carries.
    ///
    /// Classification problems are logged and end here; the caller still
    /// receives the call's real outcome.
    fn observe_failure(&self, project: &str, status: &Status) {
        let reasons = match classify::status_reasons(status) {
            Ok(reasons) => reasons,
            Err(err) => {
                error!(project, error = %err, "could not classify failure details");
                return;
            }
        };
        for guard in &self.guards {
            if reasons.contains(guard.trigger_reason()) {
                guard.cache().mark_project_disabled(project);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use bytes::Bytes;
    use chrono::{TimeDelta, Utc};
    use tonic::Code;
    use tonic_types::{ErrorDetails, StatusExt};

    use crate::cache::{CacheOptions, CacheSettings};
    use crate::clock::FixedClock;

    const RESOURCE: &str = "projects/p/locations/l/runs/r";
    const PROJECT: &str = "projects/p/locations/l";

    fn status_with_reason(reason: &str) -> Status {
        let mut details = ErrorDetails::new();
        details.set_error_info(reason, "example.test", HashMap::new());
        Status::with_error_details(Code::PermissionDenied, "denied", details)
    }

    fn standalone_guard(capability: &str, reason: &str) -> Guard {
        Guard::from_settings(capability, reason, &CacheSettings::standalone())
    }

    #[tokio::test]
    async fn open_gate_invokes_the_operation() {
        let dispatcher =
            GuardedDispatcher::new(vec![standalone_guard("Example API", Guard::SERVICE_DISABLED)]);
        let calls = AtomicUsize::new(0);

        let result = dispatcher
            .call(RESOURCE, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, Status>(42)
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn closed_gate_rejects_without_invoking() {
        let guard = standalone_guard("Example API", Guard::SERVICE_DISABLED);
        guard.cache().mark_project_disabled(PROJECT);
        let dispatcher = GuardedDispatcher::new(vec![guard]);
        let calls = AtomicUsize::new(0);

        let result = dispatcher
            .call(RESOURCE, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, Status>(())
            })
            .await;

        let err = result.unwrap_err();
        assert!(err.is_gate_rejected());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn matching_failure_reason_marks_the_cache() {
        let dispatcher =
            GuardedDispatcher::new(vec![standalone_guard("Example API", Guard::SERVICE_DISABLED)]);

        let result = dispatcher
            .call(RESOURCE, || async {
                Err::<(), _>(status_with_reason(Guard::SERVICE_DISABLED))
            })
            .await;

        assert!(matches!(result, Err(DispatchError::Call(_))));
        assert!(dispatcher.guards()[0].cache().is_project_disabled(PROJECT));
    }

    #[tokio::test]
    async fn unrelated_failure_reason_leaves_the_cache_alone() {
        let dispatcher =
            GuardedDispatcher::new(vec![standalone_guard("Example API", Guard::SERVICE_DISABLED)]);

        let _ = dispatcher
            .call(RESOURCE, || async {
                Err::<(), _>(status_with_reason("RATE_LIMITED"))
            })
            .await;

        assert!(!dispatcher.guards()[0].cache().is_project_disabled(PROJECT));
    }

    #[tokio::test]
    async fn reasonless_failure_leaves_the_cache_alone() {
        let dispatcher =
            GuardedDispatcher::new(vec![standalone_guard("Example API", Guard::SERVICE_DISABLED)]);

        let _ = dispatcher
            .call(RESOURCE, || async {
                Err::<(), _>(Status::unavailable("backend down"))
            })
            .await;

        assert!(!dispatcher.guards()[0].cache().is_project_disabled(PROJECT));
    }

    #[tokio::test]
    async fn one_failure_can_trip_multiple_guards() {
        let details = vec![
            tonic_types::ErrorDetail::from(tonic_types::ErrorInfo::new(
                Guard::SERVICE_DISABLED,
                "example.test",
                HashMap::new(),
            )),
            tonic_types::ErrorDetail::from(tonic_types::ErrorInfo::new(
                "INGESTION_DISABLED",
                "example.test",
                HashMap::new(),
            )),
        ];
        let status = Status::with_error_details_vec(Code::PermissionDenied, "denied", details);

        let dispatcher = GuardedDispatcher::new(vec![
            standalone_guard("Example API", Guard::SERVICE_DISABLED),
            standalone_guard("Ingestion", "INGESTION_DISABLED"),
        ]);

        let _ = dispatcher
            .call(RESOURCE, || async { Err::<(), _>(status) })
            .await;

        assert!(dispatcher.guards()[0].cache().is_project_disabled(PROJECT));
        assert!(dispatcher.guards()[1].cache().is_project_disabled(PROJECT));
    }

    #[tokio::test]
    async fn malformed_details_do_not_mask_the_real_failure() {
        let dispatcher =
            GuardedDispatcher::new(vec![standalone_guard("Example API", Guard::SERVICE_DISABLED)]);

        let result = dispatcher
            .call(RESOURCE, || async {
                Err::<(), _>(Status::with_details(
                    Code::Internal,
                    "boom",
                    Bytes::from_static(b"not a status proto"),
                ))
            })
            .await;

        let Err(DispatchError::Call(status)) = result else {
            panic!("expected the transport failure to pass through");
        };
        assert_eq!(status.message(), "boom");
        assert!(!dispatcher.guards()[0].cache().is_project_disabled(PROJECT));
    }

    #[tokio::test]
    async fn invalid_resource_name_fails_before_the_transport() {
        let dispatcher =
            GuardedDispatcher::new(vec![standalone_guard("Example API", Guard::SERVICE_DISABLED)]);
        let calls = AtomicUsize::new(0);

        let result = dispatcher
            .call("bananas", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, Status>(())
            })
            .await;

        assert!(matches!(
            result,
            Err(DispatchError::InvalidResourceName { .. })
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn disabled_guard_never_closes_its_gate() {
        let dispatcher = GuardedDispatcher::new(vec![Guard::from_settings(
            "Example API",
            Guard::SERVICE_DISABLED,
            &CacheSettings::disabled(),
        )]);

        let _ = dispatcher
            .call(RESOURCE, || async {
                Err::<(), _>(status_with_reason(Guard::SERVICE_DISABLED))
            })
            .await;

        let result = dispatcher
            .call(RESOURCE, || async { Ok::<_, Status>("through") })
            .await;
        assert_eq!(result.unwrap(), "through");
    }

    #[tokio::test]
    async fn gate_reopens_after_the_disablement_window() {
        let clock = Arc::new(FixedClock::new(Utc::now()));
        let options = CacheOptions::builder()
            .default_disabled_time(TimeDelta::minutes(5))
            .clock(clock.clone())
            .build()
            .unwrap();
        let dispatcher = GuardedDispatcher::new(vec![Guard::from_settings(
            "Example API",
            Guard::SERVICE_DISABLED,
            &CacheSettings::standalone_with(options),
        )]);

        let _ = dispatcher
            .call(RESOURCE, || async {
                Err::<(), _>(status_with_reason(Guard::SERVICE_DISABLED))
            })
            .await;

        let gated = dispatcher
            .call(RESOURCE, || async { Ok::<_, Status>(()) })
            .await;
        assert!(gated.unwrap_err().is_gate_rejected());

        clock.advance(TimeDelta::minutes(5) + TimeDelta::milliseconds(1));
        let reopened = dispatcher
            .call(RESOURCE, || async { Ok::<_, Status>(()) })
            .await;
        assert!(reopened.is_ok());
    }
}
