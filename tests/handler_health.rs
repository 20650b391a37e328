mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use std::sync::Arc;
use url_shortening_service::api::dto::health::HealthResponse;
use url_shortening_service::domain::entities::{NewShortUrl, ShortUrl};
use url_shortening_service::domain::repositories::UrlRepository;
use url_shortening_service::error::AppError;

#[tokio::test]
async fn test_health_reports_healthy_storage() {
    let server = common::create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let health = response.json::<HealthResponse>();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(health.checks.storage.status, "ok");
}

struct UnreachableRepository;

fn unreachable() -> AppError {
    AppError::internal("connection refused")
}

#[async_trait]
impl UrlRepository for UnreachableRepository {
    async fn create(&self, _new_short_url: NewShortUrl) -> Result<ShortUrl, AppError> {
        Err(unreachable())
    }

    async fn get_by_code(&self, _short_code: &str) -> Result<ShortUrl, AppError> {
        Err(unreachable())
    }

    async fn update(&self, _short_code: &str, _url: &str) -> Result<ShortUrl, AppError> {
        Err(unreachable())
    }

    async fn delete(&self, _short_code: &str) -> Result<(), AppError> {
        Err(unreachable())
    }

    async fn increment_access_count(&self, _short_code: &str) -> Result<(), AppError> {
        Err(unreachable())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Err(unreachable())
    }
}

#[tokio::test]
async fn test_health_degraded_when_storage_fails() {
    let state = common::create_test_state_with(Arc::new(UnreachableRepository));
    let server = common::server_for(state);

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let health = response.json::<HealthResponse>();
    assert_eq!(health.status, "degraded");
    assert_eq!(health.checks.storage.status, "error");
}

#[tokio::test]
async fn test_storage_failure_hides_cause() {
    let state = common::create_test_state_with(Arc::new(UnreachableRepository));
    let server = common::server_for(state);

    let response = server.get("/api/v1/shorten/abc123/stats").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.text();
    assert!(body.contains("internal_error"));
    assert!(body.contains("Internal server error"));
    assert!(!body.contains("connection refused"));
}
