//! Fixed-delay retry for publish calls

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1000);

/// How often and how patiently an operation is retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, the first one included
    pub max_attempts: u32,
    /// Pause between attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

/// Run `operation` until it succeeds or `policy.max_attempts` is exhausted.
///
/// Every error is retried the same way, with the same delay. The last error is
/// returned unchanged.
pub async fn retry<T, E, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if attempt < max_attempts => {
                log::warn!(
                    "Attempt {attempt}/{max_attempts} failed: {error}. Retrying... {} attempts left",
                    max_attempts - attempt
                );
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            Err(error) => {
                log::debug!("Giving up after {attempt} attempts");
                return Err(error);
            }
        }
    }
}
