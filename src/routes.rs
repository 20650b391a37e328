//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`   - Storage health check
//! - `/api/v1/*`      - Short URL REST API
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Origins from `CORS_ALLOWED_ORIGINS`
//! - **Panic recovery** - Panics become JSON 500 responses
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{cors, panic, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// Layers run outermost first: tracing, CORS, then panic recovery, so a
/// recovered panic is still traced and carries CORS headers.
pub fn app_router(state: AppState, cors_allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api/v1", api::routes::url_routes())
        .with_state(state)
        .layer(panic::layer())
        .layer(cors::layer(cors_allowed_origins))
        .layer(tracing::layer())
}

/// [`app_router`] with trailing slashes trimmed before routing.
///
/// Normalization has to wrap the router from the outside; as a router layer
/// it would run after route matching.
pub fn app_service(state: AppState, cors_allowed_origins: &[String]) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(app_router(state, cors_allowed_origins))
}
