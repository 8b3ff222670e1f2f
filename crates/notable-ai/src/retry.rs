//! Bounded retry with exponential backoff.
//!
//! The only place in the AI layer that performs timing delays; it contains
//! no business logic. Failures are classified via [`crate::classify`]:
//! non-retryable kinds return immediately, retryable kinds back off
//! `base * 2^(attempt-1)` between attempts, and exhaustion returns the last
//! observed error unchanged.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use notable_core::defaults;
use notable_core::Result;

use crate::classify::classify_error;

/// Run `operation` with the default retry policy (3 attempts, 1s base delay).
pub async fn with_retry<T, F, Fut>(operation: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    with_retry_policy(
        operation,
        defaults::RETRY_MAX_ATTEMPTS,
        Duration::from_millis(defaults::RETRY_BASE_DELAY_MS),
    )
    .await
}

/// Run `operation` with an explicit retry policy.
pub async fn with_retry_policy<T, F, Fut>(
    operation: F,
    max_attempts: u32,
    base_delay: Duration,
) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = max_attempts.max(1);

    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                let kind = classify_error(&error);

                if !kind.is_retryable() {
                    debug!(
                        subsystem = "ai",
                        component = "retry",
                        attempt,
                        kind = %kind,
                        "Non-retryable failure, giving up immediately"
                    );
                    return Err(error);
                }

                if attempt >= max_attempts {
                    warn!(
                        subsystem = "ai",
                        component = "retry",
                        attempt,
                        kind = %kind,
                        error = %error,
                        "Retries exhausted"
                    );
                    return Err(error);
                }

                let delay = base_delay * 2u32.pow(attempt - 1);
                debug!(
                    subsystem = "ai",
                    component = "retry",
                    attempt,
                    kind = %kind,
                    delay_ms = delay.as_millis() as u64,
                    "Retryable failure, backing off"
                );
                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
