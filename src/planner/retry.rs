//! Retry policy for completion requests

use crate::config::RetryConfig;
use crate::error::ProviderError;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Delay before retry `n` (0-based): `base * 2^n` plus up to `base` of jitter
fn backoff_delay(base_ms: u64, retry: u32) -> Duration {
    let exp = base_ms.saturating_mul(1u64 << retry.min(16));
    let jitter = if base_ms > 0 {
        rand::random::<u64>() % base_ms
    } else {
        0
    };
    Duration::from_millis(exp.saturating_add(jitter))
}

/// Run `request` up to `policy.max_attempts` times. Errors that another
/// attempt cannot fix (bad request, malformed payload, missing credentials)
/// are returned immediately.
pub async fn with_retry<F, Fut, T>(
    policy: &RetryConfig,
    label: &str,
    mut request: F,
) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        let err = match request().await {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };

        if !err.is_retryable() {
            debug!("'{}' failed without retry: {}", label, err);
            return Err(err);
        }
        if attempt >= max_attempts {
            warn!("'{}' failed after {} attempts: {}", label, attempt, err);
            return Err(err);
        }

        let delay = backoff_delay(policy.backoff_base_ms, attempt - 1);
        warn!(
            "'{}' attempt {} failed: {}. Retrying in {:?}",
            label, attempt, err, delay
        );
        sleep(delay).await;
    }
}
