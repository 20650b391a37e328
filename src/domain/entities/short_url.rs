//! Short URL entity.

use chrono::{DateTime, Utc};

/// A stored mapping from a short code to its original URL.
///
/// `id` and `short_code` never change after creation; `url` changes only on an
/// explicit update, `access_count` only on the resolve path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortUrl {
    pub id: i64,
    pub url: String,
    pub short_code: String,
    pub access_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShortUrl {
    /// Creates a new ShortUrl instance.
    pub fn new(
        id: i64,
        url: String,
        short_code: String,
        access_count: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            url,
            short_code,
            access_count,
            created_at,
            updated_at,
        }
    }
}

/// Input data for creating a short URL. Records always start with an access
/// count of zero; the store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortUrl {
    pub url: String,
    pub short_code: String,
}
