//! In-memory implementation of the short URL repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

fn not_found(short_code: &str) -> AppError {
    AppError::not_found("short URL not found", json!({ "code": short_code }))
}

/// Process-local repository keyed by short code.
///
/// `DashMap` shards its locks, so requests touching different codes do not
/// block each other. Inserts go through the entry API, which makes the
/// check-and-insert atomic per key.
#[derive(Debug)]
pub struct InMemoryUrlRepository {
    storage: DashMap<String, ShortUrl>,
    next_id: AtomicI64,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryUrlRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn create(&self, new_short_url: NewShortUrl) -> Result<ShortUrl, AppError> {
        match self.storage.entry(new_short_url.short_code) {
            Entry::Occupied(occupied) => Err(AppError::duplicate(
                "short code already exists",
                json!({ "code": occupied.key() }),
            )),
            Entry::Vacant(vacant) => {
                let now = Utc::now();
                let short_url = ShortUrl::new(
                    self.next_id.fetch_add(1, Ordering::Relaxed),
                    new_short_url.url,
                    vacant.key().clone(),
                    0,
                    now,
                    now,
                );
                vacant.insert(short_url.clone());

                tracing::info!(id = short_url.id, short_code = %short_url.short_code, "Inserted short URL");
                Ok(short_url)
            }
        }
    }

    async fn get_by_code(&self, short_code: &str) -> Result<ShortUrl, AppError> {
        tracing::debug!(short_code, "Looking up short URL");

        self.storage
            .get(short_code)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| not_found(short_code))
    }

    async fn exists_by_code(&self, short_code: &str) -> Result<bool, AppError> {
        Ok(self.storage.contains_key(short_code))
    }

    async fn update(&self, short_code: &str, url: &str) -> Result<ShortUrl, AppError> {
        let mut entry = self
            .storage
            .get_mut(short_code)
            .ok_or_else(|| not_found(short_code))?;

        entry.url = url.to_string();
        entry.updated_at = Utc::now();
        let updated = entry.value().clone();
        drop(entry);

        tracing::info!(short_code, "Updated short URL");
        Ok(updated)
    }

    async fn delete(&self, short_code: &str) -> Result<(), AppError> {
        self.storage
            .remove(short_code)
            .ok_or_else(|| not_found(short_code))?;

        tracing::info!(short_code, "Deleted short URL");
        Ok(())
    }

    async fn increment_access_count(&self, short_code: &str) -> Result<(), AppError> {
        let mut entry = self
            .storage
            .get_mut(short_code)
            .ok_or_else(|| not_found(short_code))?;

        entry.access_count += 1;
        Ok(())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.storage.len() as i64)
    }
}
