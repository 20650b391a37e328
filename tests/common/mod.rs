#![allow(dead_code)]

use axum_test::TestServer;
use sqlx::PgPool;
use std::sync::Arc;
use url_shortening_service::config::ShortenerConfig;
use url_shortening_service::domain::repositories::UrlRepository;
use url_shortening_service::infrastructure::persistence::InMemoryUrlRepository;
use url_shortening_service::routes::app_router;
use url_shortening_service::state::{AppState, StorageKind};

pub fn create_test_state() -> AppState {
    create_test_state_with(Arc::new(InMemoryUrlRepository::new()))
}

pub fn create_test_state_with(repository: Arc<dyn UrlRepository>) -> AppState {
    AppState::new(repository, StorageKind::InMemory, &ShortenerConfig::default())
}

pub fn create_test_server() -> TestServer {
    server_for(create_test_state())
}

pub fn server_for(state: AppState) -> TestServer {
    let app = app_router(state, &["*".to_string()]);
    TestServer::new(app).unwrap()
}

pub async fn create_test_url(pool: &PgPool, code: &str, url: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO short_urls (url, short_code) VALUES ($1, $2) RETURNING id")
        .bind(url)
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}
