use std::future::Future;
use std::time::Duration;

use attestia_core::AttestiaError;
use rand::Rng;
use serde_json::Value as Json;
use tracing::warn;

use crate::types::{RetryPolicy, WitnessSubmitError};

/// Only load-shed and timeout responses are treated as transient; every
/// other error (validation failures, non-membership, malformed payloads)
/// is permanent and must not be retried.
pub fn is_transient(error: &AttestiaError) -> bool {
    matches!(error, AttestiaError::Timeout(_) | AttestiaError::NetworkError(_))
}

fn backoff_delay(policy: &RetryPolicy, attempt: u32) -> Duration {
    let exp = policy.base_delay_ms.saturating_mul(1u64 << attempt.min(16));
    let capped = exp.min(policy.max_delay_ms);
    let jitter_span = (capped as f64 * policy.jitter_ratio) as u64;
    let jitter = if jitter_span == 0 {
        0
    } else {
        rand::thread_rng().gen_range(0..=jitter_span)
    };
    Duration::from_millis(capped.saturating_add(jitter))
}

/// Retries `attempt` with exponential backoff and jitter, retrying only on
/// [`is_transient`] errors. Retry exhaustion (or a permanent error on any
/// attempt) wraps the last error in a [`WitnessSubmitError`] carrying
/// `payload` for diagnostics.
pub async fn retry_with_backoff<F, Fut, T>(
    policy: &RetryPolicy,
    payload: &Json,
    mut attempt: F,
) -> Result<T, WitnessSubmitError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, AttestiaError>>,
{
    let mut last_err: Option<AttestiaError> = None;
    for attempt_no in 1..=policy.max_attempts {
        match attempt(attempt_no).await {
            Ok(value) => return Ok(value),
            Err(err) => {
                let transient = is_transient(&err);
                warn!(attempt = attempt_no, transient, "witness submission attempt failed");
                if !transient || attempt_no == policy.max_attempts {
                    return Err(WitnessSubmitError {
                        attempts: attempt_no,
                        cause: err,
                        payload: payload.clone(),
                    });
                }
                last_err = Some(err);
                tokio::time::sleep(backoff_delay(policy, attempt_no)).await;
            }
        }
    }
    // Unreachable: the loop above always returns on its final iteration.
    Err(WitnessSubmitError {
        attempts: policy.max_attempts,
        cause: last_err.unwrap_or_else(|| AttestiaError::Timeout("retries exhausted".into())),
        payload: payload.clone(),
    })
}
