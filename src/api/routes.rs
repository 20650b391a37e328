//! API route configuration.

use crate::api::handlers::{
    create_url_handler, delete_url_handler, get_url_handler, update_url_handler,
    url_stats_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Short URL routes, nested under `/api/v1`.
///
/// # Endpoints
///
/// - `POST   /shorten`              - Create a short URL
/// - `GET    /shorten/{code}`       - Resolve a short URL (counts an access)
/// - `PUT    /shorten/{code}`       - Change the destination URL
/// - `DELETE /shorten/{code}`       - Delete a short URL
/// - `GET    /shorten/{code}/stats` - Record with access count
pub fn url_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(create_url_handler))
        .route(
            "/shorten/{code}",
            get(get_url_handler)
                .put(update_url_handler)
                .delete(delete_url_handler),
        )
        .route("/shorten/{code}/stats", get(url_stats_handler))
}
