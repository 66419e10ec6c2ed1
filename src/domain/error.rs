//! Domain-level error outcomes shared by the repository and the service.

use thiserror::Error;

/// Opaque underlying cause carried by [`LinkError::Failure`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Outcome of a failed link operation.
///
/// Callers branch on the variant, never on the message. Storage-specific
/// errors only ever appear as the `source` of a `Failure`.
#[derive(Debug, Error)]
pub enum LinkError {
    /// The short code is already taken.
    #[error("short code `{code}` already exists")]
    Conflict { code: String },

    /// No link exists for the short code.
    #[error("short link `{code}` not found")]
    NotFound { code: String },

    /// Any other storage, connection or generation failure.
    #[error("{message}")]
    Failure {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl LinkError {
    pub fn conflict(code: impl Into<String>) -> Self {
        Self::Conflict { code: code.into() }
    }

    pub fn not_found(code: impl Into<String>) -> Self {
        Self::NotFound { code: code.into() }
    }

    /// Wraps an underlying error as an opaque failure.
    pub fn failure(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Failure {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// A failure with no underlying error.
    pub fn failure_msg(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
            source: None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
