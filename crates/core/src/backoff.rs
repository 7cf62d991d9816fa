//! Retry delay and retry eligibility for failed attempts.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ErrorClass;

/// How the delay grows between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffMode {
    /// Constant delay. Used by long-poll loops, which are bounded by the job
    /// deadline rather than an attempt count.
    Fixed,
    /// `base * 2^(attempt - 1)`, capped at `max_delay`.
    Exponential,
}

/// What to do after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Suspend for `delay`, then try again.
    Retry { delay: Duration },
    /// Give up.
    Abort,
}

/// Retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoffPolicy {
    pub mode: BackoffMode,
    pub base_delay: Duration,
    /// Cap for exponential growth.
    pub max_delay: Duration,
    /// Total attempts allowed, counting the first. `None` = no cap.
    pub max_attempts: Option<u32>,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::exponential(Duration::from_secs(1), 3)
    }
}

impl BackoffPolicy {
    /// Constant delay, no attempt cap.
    pub fn fixed(delay: Duration) -> Self {
        Self {
            mode: BackoffMode::Fixed,
            base_delay: delay,
            max_delay: delay,
            max_attempts: None,
        }
    }

    /// Doubling delay, giving up after `max_attempts` attempts in total.
    pub fn exponential(base_delay: Duration, max_attempts: u32) -> Self {
        Self {
            mode: BackoffMode::Exponential,
            base_delay,
            max_delay: Duration::from_secs(60),
            max_attempts: Some(max_attempts),
        }
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: Option<u32>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Delay to wait before attempt number `attempt` (0-based).
    ///
    /// Attempt 0 never waits.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        match self.mode {
            BackoffMode::Fixed => self.base_delay,
            BackoffMode::Exponential => {
                let factor = 1u32.checked_shl(attempt - 1).unwrap_or(u32::MAX);
                self.base_delay
                    .checked_mul(factor)
                    .unwrap_or(self.max_delay)
                    .min(self.max_delay)
            }
        }
    }

    /// Decide what follows the failure of attempt number `attempt` (0-based).
    ///
    /// Permanent failures always abort. Transient failures retry until the
    /// attempt ceiling, if any, is reached.
    pub fn decide(&self, attempt: u32, class: ErrorClass) -> RetryDecision {
        if class == ErrorClass::Permanent {
            return RetryDecision::Abort;
        }

        let next = attempt.saturating_add(1);
        match self.max_attempts {
            Some(max) if next >= max => RetryDecision::Abort,
            _ => RetryDecision::Retry {
                delay: self.delay_for_attempt(next),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn exponential_backoff_doubles_from_base() {
        let policy = BackoffPolicy::exponential(Duration::from_millis(1000), 5);

        assert_eq!(policy.delay_for_attempt(0), Duration::ZERO);
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(1000));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(2000));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(4000));
        assert_eq!(policy.delay_for_attempt(4), Duration::from_millis(8000));
    }

    #[test]
    fn exponential_backoff_is_capped() {
        let policy = BackoffPolicy::exponential(Duration::from_secs(1), 50)
            .with_max_delay(Duration::from_secs(5));

        assert_eq!(policy.delay_for_attempt(3), Duration::from_secs(4));
        assert_eq!(policy.delay_for_attempt(4), Duration::from_secs(5));
        assert_eq!(policy.delay_for_attempt(40), Duration::from_secs(5));
    }

    #[test]
    fn fixed_backoff_is_constant() {
        let policy = BackoffPolicy::fixed(Duration::from_millis(5000));

        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(5000));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(5000));
        assert_eq!(policy.delay_for_attempt(300), Duration::from_millis(5000));
    }

    #[test]
    fn exponential_aborts_at_ceiling() {
        let policy = BackoffPolicy::exponential(Duration::from_millis(1000), 3);

        assert_eq!(
            policy.decide(0, ErrorClass::Transient),
            RetryDecision::Retry {
                delay: Duration::from_millis(1000)
            }
        );
        assert_eq!(
            policy.decide(1, ErrorClass::Transient),
            RetryDecision::Retry {
                delay: Duration::from_millis(2000)
            }
        );
        assert_eq!(policy.decide(2, ErrorClass::Transient), RetryDecision::Abort);
    }

    #[test]
    fn fixed_retries_without_cap() {
        let policy = BackoffPolicy::fixed(Duration::from_secs(2));
        assert_eq!(
            policy.decide(10_000, ErrorClass::Transient),
            RetryDecision::Retry {
                delay: Duration::from_secs(2)
            }
        );
    }

    #[test]
    fn permanent_failures_never_retry() {
        assert_eq!(
            BackoffPolicy::fixed(Duration::from_secs(2)).decide(0, ErrorClass::Permanent),
            RetryDecision::Abort
        );
        assert_eq!(
            BackoffPolicy::default().decide(0, ErrorClass::Permanent),
            RetryDecision::Abort
        );
    }

    proptest! {
        #[test]
        fn exponential_delays_strictly_increase_until_cap(base_ms in 1u64..5_000, n in 1u32..12) {
            let policy = BackoffPolicy::exponential(Duration::from_millis(base_ms), 20)
                .with_max_delay(Duration::from_secs(3600 * 24));

            let current = policy.delay_for_attempt(n);
            let next = policy.delay_for_attempt(n + 1);
            prop_assert!(next > current);
            prop_assert_eq!(current, Duration::from_millis(base_ms * (1u64 << (n - 1))));
        }

        #[test]
        fn exponential_retries_stop_at_ceiling(max in 1u32..10, attempt in 0u32..20) {
            let policy = BackoffPolicy::exponential(Duration::from_millis(10), max);
            let decision = policy.decide(attempt, ErrorClass::Transient);
            if attempt + 1 >= max {
                prop_assert_eq!(decision, RetryDecision::Abort);
            } else {
                let is_retry = matches!(decision, RetryDecision::Retry { .. });
                prop_assert!(is_retry);
            }
        }
    }
}
