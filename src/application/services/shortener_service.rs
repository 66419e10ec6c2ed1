//! Short link creation, resolution and statistics service.

use std::sync::Arc;

use metrics::counter;
use tracing::{debug, warn};

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::error::LinkError;
use crate::domain::repositories::LinkRepository;
use crate::utils::code_generator::{
    CodeGenerator, DEFAULT_CODE_LENGTH, RandomCodeGenerator, is_reserved,
};

/// Counter of inserts rejected because the generated code was taken.
pub const CODE_COLLISIONS_METRIC: &str = "shortlink_code_collisions_total";

/// Counter of visit increments whose failure was discarded by `resolve`.
pub const VISIT_INCREMENT_FAILURES_METRIC: &str = "shortlink_visit_increment_failures_total";

/// Bounds on how hard `create` tries to find a free code.
///
/// `create` makes `attempts_per_length` attempts at the current length. When
/// all of them collide the length grows by one, at most
/// `max_length_escalations` times. The total number of attempts is therefore
/// `attempts_per_length * (max_length_escalations + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    attempts_per_length: u32,
    max_length_escalations: u32,
}

impl RetryPolicy {
    pub fn new(attempts_per_length: u32, max_length_escalations: u32) -> Self {
        Self {
            attempts_per_length: attempts_per_length.max(1),
            max_length_escalations,
        }
    }

    pub fn attempts_per_length(&self) -> u32 {
        self.attempts_per_length
    }

    pub fn max_length_escalations(&self) -> u32 {
        self.max_length_escalations
    }

    /// Upper bound on save attempts for a single `create`.
    pub fn max_attempts(&self) -> u64 {
        u64::from(self.attempts_per_length) * (u64::from(self.max_length_escalations) + 1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(5, 3)
    }
}

/// Service for creating and resolving short links.
///
/// Code uniqueness is left entirely to the repository's insert: a candidate
/// code is generated and saved, and a `Conflict` simply triggers another
/// candidate. There is no lookup before the insert, so two concurrent
/// creators can never both win the same code.
pub struct ShortenerService<R: LinkRepository, G: CodeGenerator = RandomCodeGenerator> {
    repository: Arc<R>,
    generator: G,
    code_length: usize,
    retry_policy: RetryPolicy,
}

impl<R: LinkRepository, G: CodeGenerator> ShortenerService<R, G> {
    /// Creates a new shortener service.
    ///
    /// A `code_length` of `0` falls back to [`DEFAULT_CODE_LENGTH`].
    pub fn new(repository: Arc<R>, generator: G, code_length: usize) -> Self {
        let code_length = if code_length == 0 {
            DEFAULT_CODE_LENGTH
        } else {
            code_length
        };

        Self {
            repository,
            generator,
            code_length,
            retry_policy: RetryPolicy::default(),
        }
    }

    /// Replaces the default [`RetryPolicy`].
    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    pub fn code_length(&self) -> usize {
        self.code_length
    }

    /// Creates a short link for `original_url`.
    ///
    /// The URL is stored as given; syntactic validation is the caller's job.
    /// Links are not deduplicated: shortening the same URL twice yields two
    /// codes.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Failure`] if code generation fails, if the
    /// repository fails with anything other than a conflict, or if the retry
    /// policy is exhausted. `Conflict` is never returned.
    pub async fn create(&self, original_url: &str) -> Result<ShortLink, LinkError> {
        let mut length = self.code_length;

        for escalation in 0..=self.retry_policy.max_length_escalations {
            for attempt in 1..=self.retry_policy.attempts_per_length {
                let code = self
                    .generator
                    .generate(length)
                    .map_err(|e| LinkError::failure("failed to generate short code", e))?;

                if is_reserved(&code) {
                    counter!(CODE_COLLISIONS_METRIC).increment(1);
                    debug!(%code, attempt, length, "Generated a reserved code, retrying");
                    continue;
                }

                match self
                    .repository
                    .save(NewShortLink::new(code, original_url))
                    .await
                {
                    Ok(link) => {
                        debug!(code = %link.code, id = link.id, "Short link created");
                        return Ok(link);
                    }
                    Err(LinkError::Conflict { code }) => {
                        counter!(CODE_COLLISIONS_METRIC).increment(1);
                        debug!(%code, attempt, length, "Short code collision, retrying");
                    }
                    Err(e) => return Err(e),
                }
            }

            if escalation < self.retry_policy.max_length_escalations {
                warn!(
                    length,
                    attempts = self.retry_policy.attempts_per_length,
                    "All attempts collided, growing code length"
                );
                length += 1;
            }
        }

        Err(LinkError::failure_msg(format!(
            "no free short code after {} attempts",
            self.retry_policy.max_attempts()
        )))
    }

    /// Resolves `code` to its original URL and records the visit.
    ///
    /// The visit increment is awaited but its outcome does not affect the
    /// result; failures are logged and counted in
    /// [`VISIT_INCREMENT_FAILURES_METRIC`].
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotFound`] if the code does not exist.
    /// Returns [`LinkError::Failure`] if the lookup fails.
    pub async fn resolve(&self, code: &str) -> Result<String, LinkError> {
        let link = self.repository.find_by_code(code).await?;

        if let Err(e) = self.repository.increment_visits(code).await {
            counter!(VISIT_INCREMENT_FAILURES_METRIC).increment(1);
            warn!(code, error = %e, "Failed to record visit");
        }

        Ok(link.original_url)
    }

    /// Returns the full record for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotFound`] if the code does not exist.
    /// Returns [`LinkError::Failure`] if the lookup fails.
    pub async fn get_stat(&self, code: &str) -> Result<ShortLink, LinkError> {
        self.repository.find_by_code(code).await
    }
}
