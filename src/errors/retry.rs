use std::future::Future;
use std::time::Duration;

use super::classification::ErrorClassification;
use super::types::AnalyzerError;
use tracing::warn;

/// Retry and timeout budget for outbound LLM calls.
///
/// Attempts are numbered from 1. The per-attempt timeout grows linearly with
/// the attempt number and is capped at `timeout_max`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub rate_limit_multiplier: u32,
    pub timeout_base: Duration,
    pub timeout_increment: Duration,
    pub timeout_max: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
            rate_limit_multiplier: 2,
            timeout_base: Duration::from_secs(30),
            timeout_increment: Duration::from_secs(15),
            timeout_max: Duration::from_secs(90),
        }
    }
}

impl RetryPolicy {
    /// Timeout applied to the HTTP call of the given attempt.
    pub fn attempt_timeout(&self, attempt: u32) -> Duration {
        let grown = self.timeout_base + self.timeout_increment.saturating_mul(attempt);
        grown.min(self.timeout_max)
    }
}

impl ErrorClassification {
    /// Delay before the attempt following `attempt` (1-indexed).
    ///
    /// - RateLimitError: base * 2^attempt * rate_limit_multiplier
    /// - everything else: base * 2^(attempt - 1)
    pub fn retry_delay(&self, attempt: u32, policy: &RetryPolicy) -> Duration {
        match self.error_type {
            "RateLimitError" => policy
                .base_delay
                .saturating_mul(2u32.saturating_pow(attempt))
                .saturating_mul(policy.rate_limit_multiplier),
            _ => policy
                .base_delay
                .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1))),
        }
    }
}

/// Execute an async operation with retry logic.
///
/// `factory` receives the current attempt number. Only errors classified as
/// retryable are attempted again; when the budget runs out the last observed
/// error is returned.
pub async fn with_retry<F, Fut, T>(
    operation_name: &str,
    policy: &RetryPolicy,
    mut factory: F,
) -> Result<T, AnalyzerError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, AnalyzerError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        let err = match factory(attempt).await {
            Ok(result) => return Ok(result),
            Err(e) => e,
        };

        let classification = err.classify();
        if !classification.retryable {
            warn!(
                operation = operation_name,
                attempt,
                error_type = classification.error_type,
                "Non-retryable error, failing immediately"
            );
            return Err(err);
        }
        if attempt >= max_attempts {
            warn!(
                operation = operation_name,
                attempt,
                max = max_attempts,
                error_type = classification.error_type,
                "Max retries exhausted"
            );
            return Err(err);
        }

        let delay = classification.retry_delay(attempt, policy);
        warn!(
            operation = operation_name,
            attempt,
            max = max_attempts,
            error_type = classification.error_type,
            delay_ms = delay.as_millis() as u64,
            error = %err,
            "Retrying after error"
        );

        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}
