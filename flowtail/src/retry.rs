//! Bounded retry policies with fixed delays.
//!
//! Remote log stores exhibit ingestion lag; the fetch routine absorbs it
//! with counted retry loops separated by a fixed delay. The policy is a
//! plain value object so tests can shrink it or pair it with a manual
//! clock.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a bounded retry loop with a fixed delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first).
    pub max_attempts: usize,
    /// Fixed delay between attempts in milliseconds.
    pub delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay_ms: 5_000,
        }
    }
}

impl RetryPolicy {
    /// Creates a new retry policy.
    #[must_use]
    pub fn new(max_attempts: usize, delay_ms: u64) -> Self {
        Self {
            max_attempts,
            delay_ms,
        }
    }

    /// Policy for waiting on a log stream to appear: 5 attempts, 5 seconds
    /// apart.
    #[must_use]
    pub fn stream_wait() -> Self {
        Self::new(5, 5_000)
    }

    /// Policy for fetching a complete log record: 7 attempts, 5 seconds
    /// apart.
    #[must_use]
    pub fn log_fetch() -> Self {
        Self::new(7, 5_000)
    }

    /// Sets the maximum attempts.
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Sets the delay between attempts.
    #[must_use]
    pub fn with_delay_ms(mut self, delay: u64) -> Self {
        self.delay_ms = delay;
        self
    }

    /// Returns the fixed delay as a [`Duration`].
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_policy_default() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.delay_ms, 5_000);
    }

    #[test]
    fn test_stream_wait_policy() {
        let policy = RetryPolicy::stream_wait();
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.delay(), Duration::from_secs(5));
    }

    #[test]
    fn test_log_fetch_policy() {
        let policy = RetryPolicy::log_fetch();
        assert_eq!(policy.max_attempts, 7);
        assert_eq!(policy.delay(), Duration::from_secs(5));
    }

    #[test]
    fn test_retry_policy_builder() {
        let policy = RetryPolicy::default()
            .with_max_attempts(9)
            .with_delay_ms(250);

        assert_eq!(policy.max_attempts, 9);
        assert_eq!(policy.delay(), Duration::from_millis(250));
    }

    #[test]
    fn test_retry_policy_serde_round_trip() {
        let policy = RetryPolicy::new(4, 1_500);
        let text = serde_json::to_string(&policy).expect("serialize");
        let back: RetryPolicy = serde_json::from_str(&text).expect("deserialize");
        assert_eq!(back, policy);
    }
}
