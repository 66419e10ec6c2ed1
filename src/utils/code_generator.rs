//! Short code generation.
//!
//! Codes are drawn from the OS CSPRNG so they cannot be enumerated or
//! predicted. If the random source fails, generation fails; there is no
//! deterministic fallback.

use thiserror::Error;

/// The 62-character alphanumeric alphabet codes are drawn from.
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Length used when a caller asks for a zero-length code.
pub const DEFAULT_CODE_LENGTH: usize = 8;

/// Random bytes at or above this value are rejected so every alphabet
/// character is equally likely (`248 = 4 * 62`).
const REJECTION_THRESHOLD: u8 = 248;

const RANDOM_CHUNK_BYTES: usize = 64;

/// Path segments owned by the router. A link stored under one of these
/// could never be reached through `GET /{code}`.
pub const RESERVED_CODES: &[&str] = &["api"];

/// Returns true if `code` collides with a routed path segment.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// The secure random source could not produce bytes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodeGenerationError {
    #[error("secure random source unavailable: {0}")]
    RandomSource(String),
}

/// Source of candidate short codes.
///
/// The service asks for a fresh candidate on every creation attempt.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Produces a code of exactly `length` characters (`0` means
    /// [`DEFAULT_CODE_LENGTH`]).
    fn generate(&self, length: usize) -> Result<String, CodeGenerationError>;
}

/// Production generator backed by `getrandom`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self, length: usize) -> Result<String, CodeGenerationError> {
        generate_code(length)
    }
}

/// Generates a cryptographically secure random short code.
///
/// Each character is drawn independently and uniformly from [`ALPHABET`].
///
/// # Errors
///
/// Returns [`CodeGenerationError::RandomSource`] if the system random number
/// generator fails.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(8)?;
/// assert_eq!(code.len(), 8);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> Result<String, CodeGenerationError> {
    let length = if length == 0 {
        DEFAULT_CODE_LENGTH
    } else {
        length
    };

    let mut code = String::with_capacity(length);
    let mut buffer = [0u8; RANDOM_CHUNK_BYTES];

    while code.len() < length {
        getrandom::fill(&mut buffer)
            .map_err(|e| CodeGenerationError::RandomSource(e.to_string()))?;

        for &byte in &buffer {
            if code.len() == length {
                break;
            }
            if byte >= REJECTION_THRESHOLD {
                continue;
            }
            code.push(char::from(ALPHABET[usize::from(byte % 62)]));
        }
    }

    Ok(code)
}
