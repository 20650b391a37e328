//! Short URL lifecycle service.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::CodeResolver;
use crate::config::ShortenerConfig;
use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, SecureCodeGenerator};
use crate::utils::deadline::with_deadline;
use crate::utils::input_validator::{InputValidator, UrlValidator};

/// Code looked up by [`UrlService::health_check`]. It is too long to be a
/// valid short code, so the probe never matches a real record.
const HEALTH_PROBE_CODE: &str = "__health_probe_not_a_short_code__";

/// Service for creating, resolving, updating and deleting short URLs.
///
/// Every persistence call runs under the configured request timeout; a call
/// that exceeds it fails with [`AppError::Internal`].
pub struct UrlService {
    repository: Arc<dyn UrlRepository>,
    validator: Arc<dyn InputValidator>,
    resolver: CodeResolver,
    request_timeout: Duration,
}

impl UrlService {
    /// Creates the service with the production generator and validator.
    pub fn new(repository: Arc<dyn UrlRepository>, config: &ShortenerConfig) -> Self {
        Self::with_collaborators(
            repository,
            Arc::new(SecureCodeGenerator),
            Arc::new(UrlValidator::new(config)),
            config,
        )
    }

    /// Creates the service with explicit collaborators.
    pub fn with_collaborators(
        repository: Arc<dyn UrlRepository>,
        generator: Arc<dyn CodeGenerator>,
        validator: Arc<dyn InputValidator>,
        config: &ShortenerConfig,
    ) -> Self {
        let resolver = CodeResolver::new(
            Arc::clone(&repository),
            generator,
            Arc::clone(&validator),
            config,
        );

        Self {
            repository,
            validator,
            resolver,
            request_timeout: config.request_timeout,
        }
    }

    /// Shortens `url`, using `custom_code` when given.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL or custom code is rejected.
    /// Returns [`AppError::Duplicate`] if the custom code is taken, or if a
    /// concurrent request stored the same code first.
    /// Returns [`AppError::Internal`] on storage, randomness or timeout failures.
    pub async fn create_short_url(
        &self,
        url: String,
        custom_code: Option<String>,
    ) -> Result<ShortUrl, AppError> {
        self.validator.validate_url(&url)?;

        let short_code = self.resolver.resolve_code(custom_code).await?;

        let created = with_deadline(
            self.request_timeout,
            "create",
            self.repository.create(NewShortUrl { url, short_code }),
        )
        .await?;

        tracing::info!(
            id = created.id,
            short_code = %created.short_code,
            "Short URL created"
        );

        Ok(created)
    }

    /// Resolves a short code and counts the access.
    ///
    /// The returned record is the one read before the increment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not exist.
    /// Returns [`AppError::Internal`] if the lookup or the increment fails.
    pub async fn get_original_url(&self, short_code: &str) -> Result<ShortUrl, AppError> {
        let short_url = with_deadline(
            self.request_timeout,
            "get_by_code",
            self.repository.get_by_code(short_code),
        )
        .await?;

        with_deadline(
            self.request_timeout,
            "increment_access_count",
            self.repository.increment_access_count(short_code),
        )
        .await
        .map_err(|e| AppError::internal_with("failed to increment access count", e))?;

        tracing::debug!(short_code, "Short URL resolved");

        Ok(short_url)
    }

    /// Points an existing short code at a new URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the new URL is rejected.
    /// Returns [`AppError::NotFound`] if the code does not exist.
    pub async fn update_short_url(&self, short_code: &str, url: &str) -> Result<ShortUrl, AppError> {
        self.validator.validate_url(url)?;

        let updated = with_deadline(
            self.request_timeout,
            "update",
            self.repository.update(short_code, url),
        )
        .await?;

        tracing::info!(short_code, "Short URL updated");

        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not exist.
    pub async fn delete_short_url(&self, short_code: &str) -> Result<(), AppError> {
        with_deadline(
            self.request_timeout,
            "delete",
            self.repository.delete(short_code),
        )
        .await?;

        tracing::info!(short_code, "Short URL deleted");

        Ok(())
    }

    /// Returns the record with its access count, without counting an access.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not exist.
    pub async fn get_statistics(&self, short_code: &str) -> Result<ShortUrl, AppError> {
        with_deadline(
            self.request_timeout,
            "get_by_code",
            self.repository.get_by_code(short_code),
        )
        .await
    }

    /// Number of stored short URLs.
    pub async fn count(&self) -> Result<i64, AppError> {
        with_deadline(self.request_timeout, "count", self.repository.count()).await
    }

    /// Probes the store with a cheap existence query.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unreachable or slow.
    pub async fn health_check(&self) -> Result<(), AppError> {
        with_deadline(
            self.request_timeout,
            "exists_by_code",
            self.repository.exists_by_code(HEALTH_PROBE_CODE),
        )
        .await
        .map(|_| ())
    }
}
