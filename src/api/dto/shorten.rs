//! DTOs for the short URL endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::ShortUrl;

/// Request to shorten a URL.
///
/// Only presence is checked here; scheme, length, blocked domains and custom
/// code shape are enforced by the service.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlRequest {
    #[validate(length(min = 1, message = "url is required"))]
    pub url: String,

    /// Optional custom short code (4-20 alphanumeric characters).
    pub custom_code: Option<String>,
}

/// Request to point a short code at a new URL.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUrlRequest {
    #[validate(length(min = 1, message = "url is required"))]
    pub url: String,
}

/// A short URL as returned by the API.
///
/// `accessCount` is omitted from creation responses.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlResponse {
    pub id: i64,
    pub url: String,
    pub short_code: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_count: Option<i64>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UrlResponse {
    /// Representation without the access count.
    pub fn created(short_url: ShortUrl) -> Self {
        Self {
            access_count: None,
            ..Self::from(short_url)
        }
    }
}

impl From<ShortUrl> for UrlResponse {
    fn from(short_url: ShortUrl) -> Self {
        Self {
            id: short_url.id,
            url: short_url.url,
            short_code: short_url.short_code,
            access_count: Some(short_url.access_count),
            created_at: short_url.created_at,
            updated_at: short_url.updated_at,
        }
    }
}
