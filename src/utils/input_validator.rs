//! Gatekeeping for externally supplied URLs and custom short codes.
//!
//! Both checks are pure functions of their input and the static
//! [`ShortenerConfig`]; neither consults storage. Uniqueness is checked by
//! [`crate::application::services::CodeResolver`].

use std::collections::HashSet;

use url::Url;

use crate::config::ShortenerConfig;

/// Minimum length of a custom short code.
pub const MIN_SHORT_CODE_LENGTH: usize = 4;

/// Maximum length of a custom short code.
pub const MAX_SHORT_CODE_LENGTH: usize = 20;

/// Reason an input was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationFailure {
    #[error("URL too long")]
    UrlTooLong,

    #[error("invalid URL format")]
    InvalidUrlFormat,

    #[error("only HTTP and HTTPS URLs are allowed")]
    UnsupportedScheme,

    #[error("domain is blocked")]
    DomainBlocked,

    #[error("short code must be between 4 and 20 characters")]
    CodeLengthOutOfRange,

    #[error("short code can only contain alphanumeric characters")]
    NonAlphanumericCode,
}

impl ValidationFailure {
    /// Stable machine-readable identifier used in error details.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationFailure::UrlTooLong => "url_too_long",
            ValidationFailure::InvalidUrlFormat => "invalid_url_format",
            ValidationFailure::UnsupportedScheme => "unsupported_scheme",
            ValidationFailure::DomainBlocked => "domain_blocked",
            ValidationFailure::CodeLengthOutOfRange => "length_out_of_range",
            ValidationFailure::NonAlphanumericCode => "non_alphanumeric_character",
        }
    }
}

/// Validation capability consumed by the resolver and the URL service.
#[cfg_attr(test, mockall::automock)]
pub trait InputValidator: Send + Sync {
    /// Checks that `raw` is an acceptable destination URL.
    fn validate_url(&self, raw: &str) -> Result<(), ValidationFailure>;

    /// Checks the shape of a caller-supplied short code.
    fn validate_short_code(&self, code: &str) -> Result<(), ValidationFailure>;
}

/// Default validator driven by [`ShortenerConfig`].
#[derive(Debug, Clone)]
pub struct UrlValidator {
    max_url_length: usize,
    blocked_domains: HashSet<String>,
}

impl UrlValidator {
    pub fn new(config: &ShortenerConfig) -> Self {
        Self {
            max_url_length: config.max_url_length,
            blocked_domains: config
                .blocked_domains
                .iter()
                .map(|d| d.to_ascii_lowercase())
                .collect(),
        }
    }

    /// Exact, case-insensitive host match. Subdomains of a blocked entry are
    /// not blocked.
    fn is_domain_blocked(&self, host: &str) -> bool {
        self.blocked_domains.contains(&host.to_ascii_lowercase())
    }
}

impl InputValidator for UrlValidator {
    fn validate_url(&self, raw: &str) -> Result<(), ValidationFailure> {
        if raw.len() > self.max_url_length {
            return Err(ValidationFailure::UrlTooLong);
        }

        let parsed = Url::parse(raw).map_err(|_| ValidationFailure::InvalidUrlFormat)?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ValidationFailure::UnsupportedScheme);
        }

        if parsed
            .host_str()
            .is_some_and(|host| self.is_domain_blocked(host))
        {
            return Err(ValidationFailure::DomainBlocked);
        }

        Ok(())
    }

    fn validate_short_code(&self, code: &str) -> Result<(), ValidationFailure> {
        if code.len() < MIN_SHORT_CODE_LENGTH || code.len() > MAX_SHORT_CODE_LENGTH {
            return Err(ValidationFailure::CodeLengthOutOfRange);
        }

        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ValidationFailure::NonAlphanumericCode);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> UrlValidator {
        UrlValidator::new(&ShortenerConfig::default())
    }

    #[test]
    fn test_accepts_https_url_with_path() {
        assert!(validator().validate_url("https://example.com/path").is_ok());
    }

    #[test]
    fn test_accepts_http_url_with_query() {
        assert!(
            validator()
                .validate_url("http://example.com/search?q=rust&page=2")
                .is_ok()
        );
    }

    #[test]
    fn test_rejects_relative_string() {
        assert_eq!(
            validator().validate_url("not-a-url"),
            Err(ValidationFailure::InvalidUrlFormat)
        );
    }

    #[test]
    fn test_rejects_empty_string() {
        assert_eq!(
            validator().validate_url(""),
            Err(ValidationFailure::InvalidUrlFormat)
        );
    }

    #[test]
    fn test_rejects_ftp_scheme() {
        assert_eq!(
            validator().validate_url("ftp://example.com"),
            Err(ValidationFailure::UnsupportedScheme)
        );
    }

    #[test]
    fn test_rejects_javascript_scheme() {
        assert_eq!(
            validator().validate_url("javascript:alert(1)"),
            Err(ValidationFailure::UnsupportedScheme)
        );
    }

    #[test]
    fn test_rejects_url_over_max_length() {
        let url = format!("https://example.com/{}", "a".repeat(2048));
        assert_eq!(
            validator().validate_url(&url),
            Err(ValidationFailure::UrlTooLong)
        );
    }

    #[test]
    fn test_accepts_url_at_max_length() {
        let prefix = "https://example.com/";
        let url = format!("{}{}", prefix, "a".repeat(2048 - prefix.len()));
        assert_eq!(url.len(), 2048);
        assert!(validator().validate_url(&url).is_ok());
    }

    #[test]
    fn test_length_checked_before_parsing() {
        let garbage = "x".repeat(3000);
        assert_eq!(
            validator().validate_url(&garbage),
            Err(ValidationFailure::UrlTooLong)
        );
    }

    #[test]
    fn test_rejects_blocked_domain() {
        assert_eq!(
            validator().validate_url("http://malware.com/x"),
            Err(ValidationFailure::DomainBlocked)
        );
    }

    #[test]
    fn test_blocked_domain_is_case_insensitive() {
        assert_eq!(
            validator().validate_url("https://PHISHING.com/login"),
            Err(ValidationFailure::DomainBlocked)
        );
    }

    #[test]
    fn test_blocked_domain_ignores_port() {
        assert_eq!(
            validator().validate_url("http://malware.com:8080/x"),
            Err(ValidationFailure::DomainBlocked)
        );
    }

    #[test]
    fn test_subdomain_of_blocked_domain_is_allowed() {
        assert!(validator().validate_url("http://sub.malware.com/x").is_ok());
        assert!(
            validator()
                .validate_url("http://malware.com.evil.org/x")
                .is_ok()
        );
    }

    #[test]
    fn test_custom_blocklist_and_limit() {
        let config = ShortenerConfig {
            max_url_length: 30,
            blocked_domains: vec!["Tracker.IO".to_string()],
            ..ShortenerConfig::default()
        };
        let validator = UrlValidator::new(&config);

        assert_eq!(
            validator.validate_url("https://tracker.io/"),
            Err(ValidationFailure::DomainBlocked)
        );
        assert!(validator.validate_url("http://malware.com/").is_ok());
        assert_eq!(
            validator.validate_url("https://example.com/a/long/path/here"),
            Err(ValidationFailure::UrlTooLong)
        );
    }

    #[test]
    fn test_accepts_valid_short_codes() {
        assert!(validator().validate_short_code("abc123").is_ok());
        assert!(validator().validate_short_code("A1b2C3").is_ok());
        assert!(validator().validate_short_code("abcd").is_ok());
        assert!(validator().validate_short_code(&"z".repeat(20)).is_ok());
    }

    #[test]
    fn test_rejects_short_code_too_short() {
        assert_eq!(
            validator().validate_short_code("ab"),
            Err(ValidationFailure::CodeLengthOutOfRange)
        );
    }

    #[test]
    fn test_rejects_short_code_too_long() {
        let code = "a".repeat(21);
        assert_eq!(
            validator().validate_short_code(&code),
            Err(ValidationFailure::CodeLengthOutOfRange)
        );
    }

    #[test]
    fn test_rejects_short_code_with_hyphen() {
        assert_eq!(
            validator().validate_short_code("abc-123"),
            Err(ValidationFailure::NonAlphanumericCode)
        );
    }

    #[test]
    fn test_rejects_short_code_with_space_or_underscore() {
        assert_eq!(
            validator().validate_short_code("abc 123"),
            Err(ValidationFailure::NonAlphanumericCode)
        );
        assert_eq!(
            validator().validate_short_code("abc_123"),
            Err(ValidationFailure::NonAlphanumericCode)
        );
    }

    #[test]
    fn test_rejects_non_ascii_letters() {
        assert_eq!(
            validator().validate_short_code("caféab"),
            Err(ValidationFailure::NonAlphanumericCode)
        );
    }

    #[test]
    fn test_failure_messages() {
        assert_eq!(ValidationFailure::UrlTooLong.to_string(), "URL too long");
        assert_eq!(
            ValidationFailure::UnsupportedScheme.to_string(),
            "only HTTP and HTTPS URLs are allowed"
        );
        assert_eq!(
            ValidationFailure::DomainBlocked.to_string(),
            "domain is blocked"
        );
    }
}
