//! Bounded retries with jittered exponential back-off.
//!
//! Shared by the provider clients. Each client decides which of its errors
//! are transient and passes that predicate in.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use rand::Rng;

const MAX_DELAY: Duration = Duration::from_secs(30);

/// How many extra attempts a provider call gets, and how long to wait
/// before the first of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_base: Duration,
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_retries: u32, backoff_base_ms: u64) -> Self {
        Self {
            max_retries,
            backoff_base: Duration::from_millis(backoff_base_ms),
        }
    }

    /// Delay before retry number `retry` (1-based), without jitter: the base
    /// doubles per retry and never exceeds 30 s.
    #[must_use]
    pub fn base_delay(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.backoff_base.saturating_mul(factor).min(MAX_DELAY)
    }

    /// [`base_delay`](Self::base_delay) scaled by a random factor in `0.75..=1.25`.
    #[must_use]
    pub fn jittered_delay(&self, retry: u32) -> Duration {
        self.base_delay(retry).mul_f64(rand::rng().random_range(0.75..=1.25))
    }
}

/// Runs `operation` until it succeeds, fails with an error `is_transient`
/// rejects, or `policy.max_retries` retries have been spent.
///
/// `provider` only labels the back-off log line.
///
/// # Errors
///
/// Returns the last error produced by `operation`.
pub async fn retry_with_backoff<T, E, F, Fut, P>(
    policy: RetryPolicy,
    provider: &'static str,
    is_transient: P,
    mut operation: F,
) -> Result<T, E>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
{
    let mut retry = 0u32;
    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if retry >= policy.max_retries || !is_transient(&err) {
            return Err(err);
        }

        retry += 1;
        let delay = policy.jittered_delay(retry);
        tracing::warn!(
            provider,
            retry,
            max_retries = policy.max_retries,
            ?delay,
            error = %err,
            "transient provider error, backing off"
        );
        tokio::time::sleep(delay).await;
    }
}
