//! Handlers for reading, updating and deleting a short URL.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::shorten::{UpdateUrlRequest, UrlResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Resolves a short code to its record and counts the access.
///
/// # Endpoint
///
/// `GET /api/v1/shorten/{code}`
///
/// The returned `accessCount` is the value before this access was counted.
///
/// # Errors
///
/// - **404 Not Found**: unknown code
pub async fn get_url_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<UrlResponse>, AppError> {
    let short_url = state.url_service.get_original_url(&code).await?;
    Ok(Json(short_url.into()))
}

/// Points a short code at a new URL.
///
/// # Endpoint
///
/// `PUT /api/v1/shorten/{code}`
///
/// # Errors
///
/// - **400 Bad Request**: the new URL is rejected
/// - **404 Not Found**: unknown code
pub async fn update_url_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(payload): Json<UpdateUrlRequest>,
) -> Result<Json<UrlResponse>, AppError> {
    payload.validate()?;

    let updated = state
        .url_service
        .update_short_url(&code, &payload.url)
        .await?;

    Ok(Json(updated.into()))
}

/// Deletes a short URL.
///
/// # Endpoint
///
/// `DELETE /api/v1/shorten/{code}`
///
/// Returns **204 No Content** on success, **404 Not Found** for an unknown code.
pub async fn delete_url_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<StatusCode, AppError> {
    state.url_service.delete_short_url(&code).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Returns a short URL with its access count, without counting an access.
///
/// # Endpoint
///
/// `GET /api/v1/shorten/{code}/stats`
pub async fn url_stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<UrlResponse>, AppError> {
    let short_url = state.url_service.get_statistics(&code).await?;
    Ok(Json(short_url.into()))
}
