//! Retry wrapper - bounded retries with exponential backoff around one provider

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::{Duration, Instant};

use futures::FutureExt;
use tracing::{debug, error, warn};

use super::{AttemptRecord, ShutdownSignal};
use crate::domain::DomainError;

/// Retry budget for a single provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_base_ms: u64,
}

impl RetryPolicy {
    /// `max_attempts` is clamped to at least one attempt
    pub fn new(max_attempts: u32, backoff_base_ms: u64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_base_ms,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff_base_ms(&self) -> u64 {
        self.backoff_base_ms
    }

    /// Delay to wait after the `failures`-th consecutive failure (1-indexed):
    /// `backoff_base_ms * 2^(failures - 1)`.
    pub fn backoff_after(&self, failures: u32) -> Duration {
        if failures == 0 {
            return Duration::ZERO;
        }

        let factor = 1u64.checked_shl(failures - 1).unwrap_or(u64::MAX);
        Duration::from_millis(self.backoff_base_ms.saturating_mul(factor))
    }
}

/// Everything that happened while retrying one provider
#[derive(Debug)]
pub struct RetryOutcome<T> {
    /// Success payload, if any attempt succeeded
    pub value: Option<T>,
    /// One record per attempt, in order
    pub attempts: Vec<AttemptRecord>,
    /// Whether a shutdown cut the retries short
    pub cancelled: bool,
}

impl<T> RetryOutcome<T> {
    pub fn succeeded(&self) -> bool {
        self.value.is_some()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.attempts.iter().rev().find_map(|a| a.error())
    }
}

/// Run `operation` up to `policy.max_attempts()` times.
///
/// Never fails: errors and panics are captured as [`AttemptRecord`]s. Backoff
/// delays are interrupted by `shutdown`, in which case no further attempt is
/// made.
pub async fn retry<T, F, Fut>(
    provider: &str,
    policy: RetryPolicy,
    shutdown: &ShutdownSignal,
    mut operation: F,
) -> RetryOutcome<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DomainError>>,
{
    let max_attempts = policy.max_attempts();
    let mut attempts = Vec::with_capacity(max_attempts as usize);

    for attempt in 1..=max_attempts {
        let start = Instant::now();

        let result = match AssertUnwindSafe(async { operation().await })
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(provider = provider, attempt = attempt, panic = message, "Provider invocation panicked");
                Err(DomainError::provider(provider, format!("invocation panicked: {}", message)))
            }
        };

        match result {
            Ok(value) => {
                attempts.push(AttemptRecord::succeeded(provider, start.elapsed()));

                return RetryOutcome {
                    value: Some(value),
                    attempts,
                    cancelled: false,
                };
            }
            Err(e) => {
                warn!(
                    provider = provider,
                    attempt = attempt,
                    max_attempts = max_attempts,
                    error = %e,
                    "Provider attempt failed"
                );
                attempts.push(AttemptRecord::failed(provider, start.elapsed(), e.to_string()));
            }
        }

        if attempt < max_attempts {
            let delay = policy.backoff_after(attempt);
            debug!(provider = provider, delay_ms = delay.as_millis() as u64, "Backing off");

            if !shutdown.sleep(delay).await {
                warn!(provider = provider, "Backoff interrupted by shutdown");

                return RetryOutcome {
                    value: None,
                    attempts,
                    cancelled: true,
                };
            }
        }
    }

    RetryOutcome {
        value: None,
        attempts,
        cancelled: false,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
