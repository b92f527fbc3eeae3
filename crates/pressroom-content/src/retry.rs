//! Exponential backoff with jitter for transient failures.

use std::time::Duration;

use pressroom_config::RetryConfig;
use rand::RngExt;

/// How many times, and how long apart, a failed request is retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    base_delay: Duration,
    max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

impl RetryPolicy {
    /// Create a policy from explicit values.
    #[must_use]
    pub fn new(max_retries: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay,
        }
    }

    /// Create a policy from the `[content.retry]` section.
    #[must_use]
    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(config.max_retries, config.base_delay(), config.max_delay())
    }

    /// A policy that never retries.
    #[must_use]
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO, Duration::ZERO)
    }

    /// Retries allowed after the first attempt.
    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Delay before retry number `attempt` (zero-based), without jitter.
    ///
    /// `base_delay * 2^attempt`, capped at `max_delay`.
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(self.max_delay)
    }

    /// [`backoff`](Self::backoff) plus a random jitter of up to half of it.
    #[must_use]
    pub fn delay(&self, attempt: u32) -> Duration {
        let backoff = self.backoff(attempt);
        let max_jitter = u64::try_from(backoff.as_millis() / 2).unwrap_or(u64::MAX);
        let jitter = rand::rng().random_range(0..=max_jitter);
        backoff + Duration::from_millis(jitter)
    }
}
