//! Handler for the URL shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{CreateUrlRequest, UrlResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL.
///
/// # Endpoint
///
/// `POST /api/v1/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/a",
///   "customCode": "test1"
/// }
/// ```
///
/// `customCode` is optional; without it a random 6-character code is assigned.
///
/// # Response
///
/// **201 Created**
///
/// ```json
/// {
///   "id": 1,
///   "url": "https://example.com/a",
///   "shortCode": "test1",
///   "createdAt": "2024-01-01T00:00:00Z",
///   "updatedAt": "2024-01-01T00:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - **400 Bad Request**: invalid URL, blocked domain or malformed custom code
/// - **409 Conflict**: custom code already taken
/// - **500 Internal Server Error**: storage failure or no free code found
pub async fn create_url_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUrlRequest>,
) -> Result<(StatusCode, Json<UrlResponse>), AppError> {
    payload.validate()?;

    let created = state
        .url_service
        .create_short_url(payload.url, payload.custom_code)
        .await?;

    Ok((StatusCode::CREATED, Json(UrlResponse::created(created))))
}
