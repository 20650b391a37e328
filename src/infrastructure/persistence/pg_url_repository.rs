//! PostgreSQL implementation of the short URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

const SHORT_URL_COLUMNS: &str = "id, url, short_code, access_count, created_at, updated_at";

#[derive(Debug, FromRow)]
struct ShortUrlRow {
    id: i64,
    url: String,
    short_code: String,
    access_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ShortUrlRow> for ShortUrl {
    fn from(row: ShortUrlRow) -> Self {
        ShortUrl::new(
            row.id,
            row.url,
            row.short_code,
            row.access_count,
            row.created_at,
            row.updated_at,
        )
    }
}

fn not_found(short_code: &str) -> AppError {
    AppError::not_found("short URL not found", json!({ "code": short_code }))
}

/// PostgreSQL repository for short URLs.
///
/// Uniqueness of `short_code` is enforced by the `short_urls_short_code_key`
/// constraint; a violating insert surfaces as [`AppError::Duplicate`].
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn create(&self, new_short_url: NewShortUrl) -> Result<ShortUrl, AppError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(&format!(
            "INSERT INTO short_urls (url, short_code) VALUES ($1, $2) RETURNING {SHORT_URL_COLUMNS}"
        ))
        .bind(&new_short_url.url)
        .bind(&new_short_url.short_code)
        .fetch_one(self.pool.as_ref())
        .await?;

        tracing::info!(id = row.id, short_code = %row.short_code, "Inserted short URL");
        Ok(row.into())
    }

    async fn get_by_code(&self, short_code: &str) -> Result<ShortUrl, AppError> {
        tracing::debug!(short_code, "Looking up short URL");

        sqlx::query_as::<_, ShortUrlRow>(&format!(
            "SELECT {SHORT_URL_COLUMNS} FROM short_urls WHERE short_code = $1"
        ))
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?
        .map(ShortUrl::from)
        .ok_or_else(|| not_found(short_code))
    }

    async fn exists_by_code(&self, short_code: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM short_urls WHERE short_code = $1)",
        )
        .bind(short_code)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn update(&self, short_code: &str, url: &str) -> Result<ShortUrl, AppError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(&format!(
            "UPDATE short_urls SET url = $2, updated_at = NOW() \
             WHERE short_code = $1 RETURNING {SHORT_URL_COLUMNS}"
        ))
        .bind(short_code)
        .bind(url)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or_else(|| not_found(short_code))?;

        tracing::info!(short_code, "Updated short URL");
        Ok(row.into())
    }

    async fn delete(&self, short_code: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM short_urls WHERE short_code = $1")
            .bind(short_code)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(short_code));
        }

        tracing::info!(short_code, "Deleted short URL");
        Ok(())
    }

    async fn increment_access_count(&self, short_code: &str) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE short_urls SET access_count = access_count + 1 WHERE short_code = $1",
        )
        .bind(short_code)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(short_code));
        }

        Ok(())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM short_urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
