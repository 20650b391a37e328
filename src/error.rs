//! Application error type shared by every layer.
//!
//! [`AppError`] carries one of four kinds ([`ErrorKind`]) so callers can branch
//! on the failure without downcasting. Internal errors keep their originating
//! cause for diagnostics; it is logged but never serialized into a response.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::utils::input_validator::ValidationFailure;

/// Boxed cause attached to internal errors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Error payload returned to HTTP clients.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Discriminant of an [`AppError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Duplicate,
    NotFound,
    Internal,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Caller-supplied input violates a rule.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// A short code is already taken.
    #[error("{message}")]
    Duplicate { message: String, details: Value },

    /// The referenced short code does not exist.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Any underlying failure: storage, randomness, timeouts, exhausted retries.
    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn duplicate(message: impl Into<String>, details: Value) -> Self {
        Self::Duplicate {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    /// Internal error without an underlying cause.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Internal error wrapping the failure that caused it.
    pub fn internal_with<E>(message: impl Into<String>, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::Internal {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation { .. } => ErrorKind::Validation,
            AppError::Duplicate { .. } => ErrorKind::Duplicate,
            AppError::NotFound { .. } => ErrorKind::NotFound,
            AppError::Internal { .. } => ErrorKind::Internal,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Duplicate => StatusCode::CONFLICT,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into its client-facing representation.
    ///
    /// Internal errors are reduced to a generic message.
    pub fn to_error_info(&self) -> ErrorInfo {
        match self {
            AppError::Validation { message, details } => ErrorInfo {
                code: "validation_error",
                message: message.clone(),
                details: details.clone(),
            },
            AppError::Duplicate { message, details } => ErrorInfo {
                code: "duplicate",
                message: message.clone(),
                details: details.clone(),
            },
            AppError::NotFound { message, details } => ErrorInfo {
                code: "not_found",
                message: message.clone(),
                details: details.clone(),
            },
            AppError::Internal { .. } => ErrorInfo {
                code: "internal_error",
                message: "Internal server error".to_string(),
                details: json!({}),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal { message, source } = &self {
            match source {
                Some(cause) => tracing::error!(error = %cause, "{message}"),
                None => tracing::error!("{message}"),
            }
        }

        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationFailure> for AppError {
    fn from(failure: ValidationFailure) -> Self {
        AppError::bad_request(failure.to_string(), json!({ "reason": failure.code() }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::bad_request("Invalid request payload", json!(errors))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::duplicate(
                "short code already exists",
                json!({ "constraint": db.constraint() }),
            );
        }

        AppError::internal_with("Database error", e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use std::error::Error as _;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(
            AppError::bad_request("bad", json!({})).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            AppError::duplicate("taken", json!({})).kind(),
            ErrorKind::Duplicate
        );
        assert_eq!(
            AppError::not_found("missing", json!({})).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(AppError::internal("boom").kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_internal_keeps_source() {
        let cause = std::io::Error::other("connection reset");
        let err = AppError::internal_with("failed to lookup record", cause);

        assert_eq!(err.to_string(), "failed to lookup record");
        let source = err.source().expect("source should be preserved");
        assert_eq!(source.to_string(), "connection reset");
    }

    #[test]
    fn test_validation_failure_conversion() {
        let err: AppError = ValidationFailure::UrlTooLong.into();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "URL too long");
    }

    #[tokio::test]
    async fn test_status_codes() {
        let cases = [
            (
                AppError::bad_request("bad", json!({})),
                StatusCode::BAD_REQUEST,
            ),
            (AppError::duplicate("taken", json!({})), StatusCode::CONFLICT),
            (
                AppError::not_found("missing", json!({})),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::internal("boom"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[tokio::test]
    async fn test_internal_response_hides_cause() {
        let err = AppError::internal_with(
            "failed to lookup record",
            std::io::Error::other("password authentication failed for user admin"),
        );

        let json = body_json(err.into_response()).await;

        assert_eq!(json["error"]["code"], "internal_error");
        assert_eq!(json["error"]["message"], "Internal server error");
        assert!(!json.to_string().contains("password"));
    }

    #[tokio::test]
    async fn test_duplicate_response_body() {
        let err = AppError::duplicate("short code already exists", json!({ "code": "golang" }));

        let json = body_json(err.into_response()).await;

        assert_eq!(json["error"]["code"], "duplicate");
        assert_eq!(json["error"]["message"], "short code already exists");
        assert_eq!(json["error"]["details"]["code"], "golang");
    }
}
