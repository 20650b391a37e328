//! Per-call deadline for persistence operations.

use std::future::Future;
use std::time::Duration;

use crate::error::AppError;

/// Runs a persistence call, failing with [`AppError::Internal`] if it does not
/// finish within `limit`.
///
/// The inner future is dropped on timeout, abandoning the in-flight call.
pub async fn with_deadline<T, F>(
    limit: Duration,
    operation: &'static str,
    call: F,
) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(elapsed) => {
            tracing::warn!(
                operation,
                timeout_ms = limit.as_millis() as u64,
                "Persistence call timed out"
            );
            Err(AppError::internal_with(
                format!("{operation}: persistence call timed out"),
                elapsed,
            ))
        }
    }
}
