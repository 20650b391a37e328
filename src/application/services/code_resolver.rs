//! Short code uniqueness resolution.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use crate::config::ShortenerConfig;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::code_generator::CodeGenerator;
use crate::utils::deadline::with_deadline;
use crate::utils::input_validator::InputValidator;

/// Picks the short code for a new record.
///
/// A custom code is validated and used as-is if free. Otherwise random codes
/// are generated until one is not taken, up to `max_attempts` tries.
///
/// The existence check is a pre-check only. Two concurrent requests can still
/// settle on the same code; the repository's uniqueness constraint rejects the
/// second insert.
pub struct CodeResolver {
    repository: Arc<dyn UrlRepository>,
    generator: Arc<dyn CodeGenerator>,
    validator: Arc<dyn InputValidator>,
    code_length: usize,
    max_attempts: usize,
    request_timeout: Duration,
}

impl CodeResolver {
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        generator: Arc<dyn CodeGenerator>,
        validator: Arc<dyn InputValidator>,
        config: &ShortenerConfig,
    ) -> Self {
        Self {
            repository,
            generator,
            validator,
            code_length: config.code_length,
            max_attempts: config.max_retries,
            request_timeout: config.request_timeout,
        }
    }

    /// Returns a short code that is not yet taken.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `custom_code` has an invalid shape.
    /// Returns [`AppError::Duplicate`] if `custom_code` is already taken.
    /// Returns [`AppError::Internal`] if an existence check fails, the random
    /// source fails, or every generated code collides.
    pub async fn resolve_code(&self, custom_code: Option<String>) -> Result<String, AppError> {
        match custom_code {
            Some(custom) => self.claim_custom_code(custom).await,
            None => self.generate_unique_code().await,
        }
    }

    async fn claim_custom_code(&self, custom: String) -> Result<String, AppError> {
        self.validator.validate_short_code(&custom)?;

        if self.code_exists(&custom).await? {
            tracing::debug!(short_code = %custom, "Custom short code already taken");
            return Err(AppError::duplicate(
                "short code already exists",
                json!({ "code": custom }),
            ));
        }

        Ok(custom)
    }

    async fn generate_unique_code(&self) -> Result<String, AppError> {
        for attempt in 1..=self.max_attempts {
            let code = self
                .generator
                .generate(self.code_length)
                .map_err(|e| AppError::internal_with("failed to generate short code", e))?;

            if !self.code_exists(&code).await? {
                return Ok(code);
            }

            tracing::debug!(attempt, short_code = %code, "Generated short code collided");
        }

        tracing::warn!(
            attempts = self.max_attempts,
            "Exhausted short code generation attempts"
        );
        Err(AppError::internal(format!(
            "failed to generate unique code after {} attempts",
            self.max_attempts
        )))
    }

    async fn code_exists(&self, code: &str) -> Result<bool, AppError> {
        with_deadline(
            self.request_timeout,
            "exists_by_code",
            self.repository.exists_by_code(code),
        )
        .await
        .map_err(|e| AppError::internal_with("failed to check code existence", e))
    }
}
