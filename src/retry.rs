//! Bounded fixed-delay retry for transient failures.
//!
//! Only [`Error::Transport`](crate::Error::Transport) failures are retried.
//! The delay between attempts is constant; Chargify fails rarely enough that
//! backoff buys nothing.

use std::time::Duration;

/// Default number of extra attempts after the first.
pub const DEFAULT_RETRIES: u32 = 1;

/// Default pause between attempts.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// How many times a transport failure is retried, and how long to wait.
///
/// # Examples
///
/// ```
/// use chargify_api::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.delay_for_attempt(1), Some(Duration::from_millis(500)));
/// assert_eq!(policy.delay_for_attempt(2), None);
///
/// let patient = policy.with_retries(3);
/// assert_eq!(patient.delay_for_attempt(3), Some(Duration::from_millis(500)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts allowed after the first one.
    pub retries: u32,
    /// Pause before each extra attempt.
    pub delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy.
    pub const fn new(retries: u32, delay: Duration) -> Self {
        Self { retries, delay }
    }

    /// Returns a copy with a different retry budget.
    pub const fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Returns the delay before the given retry, or `None` once the budget is
    /// spent.
    ///
    /// # Arguments
    ///
    /// * `attempt` - The retry number (1-indexed, so 1 = first retry)
    pub fn delay_for_attempt(&self, attempt: u32) -> Option<Duration> {
        if attempt == 0 || attempt > self.retries {
            None
        } else {
            Some(self.delay)
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_RETRIES, DEFAULT_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_delays() {
        let policy = RetryPolicy::new(3, Duration::from_secs(1));

        assert_eq!(policy.delay_for_attempt(1), Some(Duration::from_secs(1)));
        assert_eq!(policy.delay_for_attempt(2), Some(Duration::from_secs(1)));
        assert_eq!(policy.delay_for_attempt(3), Some(Duration::from_secs(1)));
        assert_eq!(policy.delay_for_attempt(4), None);
    }

    #[test]
    fn test_zero_budget_never_retries() {
        let policy = RetryPolicy::default().with_retries(0);
        assert_eq!(policy.delay_for_attempt(1), None);
    }

    #[test]
    fn test_defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.retries, 1);
        assert_eq!(policy.delay, Duration::from_millis(500));
    }
}
