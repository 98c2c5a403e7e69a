//! # Failure Reason Extraction
//!
//! A gRPC status carries structured details as a serialized `google.rpc.Status`
//! payload. Reasons live in `ErrorInfo` detail entries; a status may carry
//! zero, one, or many of them, mixed with other detail kinds. Details is a
//! list rather than a fixed record because no entry is required and services
//! can introduce new kinds, so every entry has to be inspected.

use std::collections::HashSet;
use std::error::Error as StdError;

use tonic::Status;
use tonic_types::{ErrorDetail, StatusExt};
use tracing::{debug, error};

use crate::error::ClassifyError;

/// Extracts the set of machine-readable reasons from a status' details.
///
/// A status without structured details yields an empty set. Fails with
/// [`ClassifyError::MalformedDetails`] only when a details payload is present
/// but cannot be decoded.
pub fn status_reasons(status: &Status) -> Result<HashSet<String>, ClassifyError> {
    debug!(code = ?status.code(), "extracting reasons from status details");
    let details = status.check_error_details_vec()?;
    Ok(details
        .into_iter()
        .filter_map(|detail| match detail {
            ErrorDetail::ErrorInfo(info) => {
                debug!(reason = %info.reason, "extracted reason from error info");
                Some(info.reason)
            }
            _ => None,
        })
        .collect())
}

/// Like [`status_reasons`], for callers holding an opaque error.
///
/// Walks the source chain until a gRPC status turns up. An error with no
/// status anywhere in its chain fails with [`ClassifyError::NotGrpcStatus`];
/// that is a wrong-object programmer error, not an expected runtime condition.
pub fn error_reasons(err: &(dyn StdError + 'static)) -> Result<HashSet<String>, ClassifyError> {
    let mut current: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(candidate) = current {
        if let Some(status) = candidate.downcast_ref::<Status>() {
            return status_reasons(status);
        }
        current = candidate.source();
    }
    error!("provided error is not a gRPC status");
    Err(ClassifyError::NotGrpcStatus)
}
