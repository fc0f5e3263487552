//! Bounded retry for idempotent calls to external services

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::errors::Result;

/// Base delay between attempts; attempt `n` waits `n * BACKOFF_STEP`
const BACKOFF_STEP: Duration = Duration::from_millis(100);

/// Run `op` up to `max_attempts` times, retrying only transient failures
///
/// `op` must be safe to repeat. A `max_attempts` of zero is treated as one.
pub async fn with_retries<T, F, Fut>(label: &str, max_attempts: usize, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < max_attempts && e.is_transient() => {
                warn!("Attempt {}/{}: {} failed: {}", attempt, max_attempts, label, e);
                tokio::time::sleep(BACKOFF_STEP * attempt as u32).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
