use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::AttemptError;

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

/// How many attempts a request gets and how long to wait between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    /// At least one attempt is always made.
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries: max_retries.max(1),
            base_delay,
        }
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Delay before attempt `attempt` (zero-based): `base * 2^(attempt-1)`,
    /// and nothing before the first attempt.
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let factor = 1u32.checked_shl(attempt - 1).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES, DEFAULT_BASE_DELAY)
    }
}

/// Result of a retry sequence. Exhaustion is an ordinary outcome, not an
/// error: the caller switches to its offline path.
#[derive(Debug)]
pub enum RetryOutcome<T> {
    Success { value: T, attempts: u32 },
    Exhausted { attempts: u32, last_error: AttemptError },
}

impl<T> RetryOutcome<T> {
    pub fn attempts(&self) -> u32 {
        match self {
            RetryOutcome::Success { attempts, .. } | RetryOutcome::Exhausted { attempts, .. } => {
                *attempts
            }
        }
    }
}

/// Runs `attempt` until it succeeds or the policy's budget is spent,
/// sleeping with exponential backoff between tries.
///
/// The closure receives the zero-based attempt number. Every error counts
/// against the budget; there is no non-retryable class.
pub async fn call_with_retry<F, Fut, T>(policy: RetryPolicy, mut attempt: F) -> RetryOutcome<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, AttemptError>>,
{
    let mut number = 0;
    loop {
        let delay = policy.delay_before(number);
        if !delay.is_zero() {
            debug!(
                attempt = number + 1,
                delay_ms = delay.as_millis() as u64,
                "Backing off before retry"
            );
            sleep(delay).await;
        }

        match attempt(number).await {
            Ok(value) => {
                return RetryOutcome::Success {
                    value,
                    attempts: number + 1,
                }
            }
            Err(error) => {
                number += 1;
                warn!(
                    attempt = number,
                    max_retries = policy.max_retries,
                    error = %error,
                    "Attempt failed"
                );
                if number >= policy.max_retries {
                    return RetryOutcome::Exhausted {
                        attempts: number,
                        last_error: error,
                    };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    #[test]
    fn test_delays_double() {
        let policy = RetryPolicy::new(4, Duration::from_millis(100));
        assert_eq!(policy.delay_before(0), Duration::ZERO);
        assert_eq!(policy.delay_before(1), Duration::from_millis(100));
        assert_eq!(policy.delay_before(2), Duration::from_millis(200));
        assert_eq!(policy.delay_before(3), Duration::from_millis(400));
    }

    #[test]
    fn test_zero_retries_still_makes_one_attempt() {
        assert_eq!(RetryPolicy::new(0, DEFAULT_BASE_DELAY).max_retries(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_sleeps_between_attempts_only() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1000));
        let calls = AtomicU32::new(0);
        let started = Instant::now();

        let outcome: RetryOutcome<()> = call_with_retry(policy, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(AttemptError::Parse(ParseError::NoStructuredDataFound)) }
        })
        .await;

        assert_eq!(started.elapsed(), Duration::from_millis(3000));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        match outcome {
            RetryOutcome::Exhausted { attempts, last_error } => {
                assert_eq!(attempts, 3);
                assert!(matches!(last_error, AttemptError::Parse(_)));
            }
            RetryOutcome::Success { .. } => panic!("expected exhaustion"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_after_a_failure() {
        let policy = RetryPolicy::new(3, Duration::from_millis(500));
        let started = Instant::now();

        let outcome = call_with_retry(policy, |number| async move {
            if number == 0 {
                Err(AttemptError::Validation("nothing usable".to_string()))
            } else {
                Ok(number)
            }
        })
        .await;

        assert_eq!(started.elapsed(), Duration::from_millis(500));
        match outcome {
            RetryOutcome::Success { value, attempts } => {
                assert_eq!(value, 1);
                assert_eq!(attempts, 2);
            }
            RetryOutcome::Exhausted { .. } => panic!("expected success"),
        }
    }
}
