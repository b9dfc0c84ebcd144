//! Retry with exponential back-off and jitter for geocoding requests.
//!
//! Only transient failures are retried: timeouts, connection errors, HTTP
//! 5xx and 429. API-level statuses (`REQUEST_DENIED`, quota exhaustion) and
//! malformed bodies come back the same way on every attempt, so they are
//! returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::GeocodeError;

const MAX_DELAY_MS: u64 = 60_000;

pub(crate) fn is_retriable(err: &GeocodeError) -> bool {
    match err {
        GeocodeError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        GeocodeError::RateLimited { .. } => true,
        GeocodeError::Api { .. }
        | GeocodeError::Deserialize { .. }
        | GeocodeError::InvalidBaseUrl { .. }
        | GeocodeError::MissingApiKey => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// The n-th retry waits `backoff_base_ms × 2^(n-1)` ms ± 25 % jitter, capped
/// at 60 s. A 429 carrying `Retry-After` waits at least that long (also capped).
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, GeocodeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GeocodeError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let delay_ms = backoff_delay_ms(backoff_base_ms, attempt, &err);
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient geocoding error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

fn backoff_delay_ms(backoff_base_ms: u64, attempt: u32, err: &GeocodeError) -> u64 {
    let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let jittered = (computed.min(MAX_DELAY_MS) as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;

    let floor_ms = match err {
        GeocodeError::RateLimited { retry_after_secs } => retry_after_secs.saturating_mul(1000),
        _ => 0,
    };
    jittered.max(floor_ms).min(MAX_DELAY_MS)
}
