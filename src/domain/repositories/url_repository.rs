//! Repository trait for short URL data access.

use async_trait::async_trait;

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::error::{AppError, ErrorKind};

/// Persistence interface consumed by the services.
///
/// Implementations must enforce short code uniqueness themselves: the
/// existence check done before [`UrlRepository::create`] is best effort only,
/// so a concurrent insert of the same code has to be rejected here.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - Process-local store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Persists a new short URL with an access count of zero.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Duplicate`] if the short code is already taken.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, new_short_url: NewShortUrl) -> Result<ShortUrl, AppError>;

    /// Finds a short URL by its code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this code.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn get_by_code(&self, short_code: &str) -> Result<ShortUrl, AppError>;

    /// Returns whether a record with this code exists.
    ///
    /// The default implementation probes [`UrlRepository::get_by_code`] and
    /// treats not-found as `false`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn exists_by_code(&self, short_code: &str) -> Result<bool, AppError> {
        match self.get_by_code(short_code).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Replaces the destination URL of an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this code.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn update(&self, short_code: &str, url: &str) -> Result<ShortUrl, AppError>;

    /// Removes a record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this code.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete(&self, short_code: &str) -> Result<(), AppError>;

    /// Adds one to the access count of a record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this code.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn increment_access_count(&self, short_code: &str) -> Result<(), AppError>;

    /// Returns the number of stored records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count(&self) -> Result<i64, AppError>;
}
