//! Short code generation.
//!
//! Codes are drawn from the OS CSPRNG so they cannot be predicted or
//! enumerated. Each symbol is sampled uniformly from the 62-character base62
//! alphabet by rejection sampling on random bytes.

/// Base62 alphabet: digits, lowercase, uppercase.
pub const BASE62_ALPHABET: &[u8; 62] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Largest multiple of 62 that fits in a byte. Bytes at or above it are
/// discarded so `byte % 62` stays uniform.
const REJECTION_BOUND: u8 = 248;

/// The secure random source failed or is unavailable.
#[derive(Debug, thiserror::Error)]
#[error("secure random source unavailable: {reason}")]
pub struct RandomSourceError {
    reason: String,
}

impl RandomSourceError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl From<getrandom::Error> for RandomSourceError {
    fn from(e: getrandom::Error) -> Self {
        Self::new(e.to_string())
    }
}

/// Source of random short codes.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Returns a random base62 code of exactly `length` characters.
    ///
    /// # Errors
    ///
    /// Returns [`RandomSourceError`] if no secure randomness is available.
    fn generate(&self, length: usize) -> Result<String, RandomSourceError>;
}

/// [`CodeGenerator`] backed by the operating system's CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecureCodeGenerator;

impl CodeGenerator for SecureCodeGenerator {
    fn generate(&self, length: usize) -> Result<String, RandomSourceError> {
        generate_code(length)
    }
}

/// Generates a cryptographically secure random base62 code.
///
/// `length == 0` yields an empty string.
///
/// # Errors
///
/// Returns [`RandomSourceError`] if `getrandom` fails.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6)?;
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> Result<String, RandomSourceError> {
    let mut code = String::with_capacity(length);
    // ~3% of bytes are rejected, so a slightly larger buffer usually suffices.
    let mut buffer = vec![0u8; length + length / 8 + 1];

    while code.len() < length {
        getrandom::fill(&mut buffer)?;

        for &byte in &buffer {
            if code.len() == length {
                break;
            }
            if byte < REJECTION_BOUND {
                code.push(BASE62_ALPHABET[(byte % 62) as usize] as char);
            }
        }
    }

    Ok(code)
}
