use crate::metrics::TranslationMetrics;
use crate::provider::{ProviderError, TranslationClient};
use crate::rate_limit::RateLimiter;
use crate::validator::PlaceholderValidator;
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, warn};

/// Configuration for retry behavior
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the first one)
    pub max_attempts: u32,
    /// Initial delay before the first retry
    pub initial_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Multiplier for exponential backoff (e.g., 2.0 doubles the delay each time)
    pub backoff_multiplier: f64,
    /// Explicit delays before retry 1, 2, ...; overrides the exponential curve
    pub schedule: Option<Vec<Duration>>,
}

impl RetryConfig {
    /// Create a new retry configuration (at least one attempt is always made)
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
            schedule: None,
        }
    }

    /// Use a fixed backoff schedule. The last entry is reused when there are
    /// more retries than entries.
    pub fn from_schedule(max_attempts: u32, schedule: Vec<Duration>) -> Self {
        let initial_delay = schedule.first().copied().unwrap_or(Duration::ZERO);
        Self {
            schedule: Some(schedule),
            ..Self::new(max_attempts, initial_delay)
        }
    }

    /// Set the maximum delay between retries
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Set the backoff multiplier
    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Preset: per-leaf provider calls (3 attempts)
    /// Delays: 1s, 2s = 3s total wait time
    pub fn provider_call() -> Self {
        Self::new(3, Duration::from_secs(1))
            .with_max_delay(Duration::from_secs(8))
            .with_backoff_multiplier(2.0)
    }

    /// Calculate the delay for a given attempt number (0-indexed)
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        if let Some(schedule) = &self.schedule {
            let index = (attempt as usize - 1).min(schedule.len().saturating_sub(1));
            return schedule.get(index).copied().unwrap_or(Duration::ZERO);
        }

        let delay_ms = self.initial_delay.as_millis() as f64
            * self.backoff_multiplier.powi((attempt - 1) as i32);

        let delay = Duration::from_millis(delay_ms as u64);
        delay.min(self.max_delay)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::provider_call()
    }
}

/// Execute an async operation with retries, using a predicate to determine if retry is appropriate
///
/// Errors the predicate rejects are returned immediately. Otherwise the
/// last error is returned once `max_attempts` is used up.
pub async fn with_retry_if<T, E, F, Fut, P>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
    should_retry: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: Fn(&E) -> bool,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        // Wait before retry (except for first attempt)
        let delay = config.delay_for_attempt(attempt);
        if !delay.is_zero() {
            debug!(
                "{}: Retry attempt {}/{} after {:?}",
                operation_name,
                attempt + 1,
                max_attempts,
                delay
            );
            sleep(delay).await;
        }

        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    debug!(
                        "{}: Succeeded on attempt {}/{}",
                        operation_name,
                        attempt + 1,
                        max_attempts
                    );
                }
                return Ok(result);
            }
            Err(e) => {
                if !should_retry(&e) {
                    debug!(
                        "{}: Error is not retryable, failing immediately: {}",
                        operation_name, e
                    );
                    return Err(e);
                }

                let remaining = max_attempts - attempt - 1;
                if remaining == 0 {
                    warn!(
                        "{}: All {} attempts failed. Last error: {}",
                        operation_name, max_attempts, e
                    );
                    return Err(e);
                }

                warn!(
                    "{}: Attempt {}/{} failed ({}), {} retries remaining",
                    operation_name,
                    attempt + 1,
                    max_attempts,
                    e,
                    remaining
                );
            }
        }

        attempt += 1;
    }
}

/// Retry, rate limiting and fail-open fallback around a `TranslationClient`.
#[derive(Debug)]
pub struct RetryPolicy {
    config: RetryConfig,
    call_timeout: Duration,
    limiter: RateLimiter,
}

impl RetryPolicy {
    pub fn new(config: RetryConfig, call_timeout: Duration, limiter: RateLimiter) -> Self {
        Self {
            config,
            call_timeout,
            limiter,
        }
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Translate one leaf, never failing.
    ///
    /// Each attempt waits for the rate limiter and is bounded by the call
    /// timeout. When every attempt fails (or the provider rejects the
    /// request) the source text comes back unchanged and a soft failure is
    /// recorded in `metrics`. Blank text is returned without a call.
    pub async fn translate_with_retry<C>(
        &self,
        client: &C,
        text: &str,
        target_code: &str,
        metrics: &TranslationMetrics,
    ) -> String
    where
        C: TranslationClient,
    {
        match self.try_translate(client, text, target_code, metrics).await {
            Ok(translated) => translated,
            Err(_) => {
                metrics.record_soft_failure();
                text.to_string()
            }
        }
    }

    /// Like `translate_with_retry`, but a rejection is returned to the caller.
    ///
    /// Transient failures still fall back to the source text once retries run
    /// out. A `ProviderError::Rejected` answer is final for every leaf of the
    /// run (bad key, unknown model), so it is not treated as a soft failure.
    pub async fn try_translate<C>(
        &self,
        client: &C,
        text: &str,
        target_code: &str,
        metrics: &TranslationMetrics,
    ) -> Result<String, ProviderError>
    where
        C: TranslationClient,
    {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let limiter = &self.limiter;
        let call_timeout = self.call_timeout;
        let operation_name = format!("Translation to {}", target_code);

        let result = with_retry_if(
            &self.config,
            &operation_name,
            move || async move {
                limiter.throttle().await;
                metrics.record_api_call();

                let outcome = match timeout(call_timeout, client.translate(text, target_code)).await {
                    Ok(outcome) => outcome,
                    Err(_) => Err(ProviderError::Timeout(call_timeout)),
                };
                if outcome.is_err() {
                    metrics.record_api_failure();
                }
                outcome
            },
            ProviderError::is_retryable,
        )
        .await;

        match result {
            Ok(translated) => {
                let validation = PlaceholderValidator::validate(text, &translated);
                if !validation.is_clean() {
                    metrics.record_placeholder_mismatch();
                    warn!(
                        "Translation to {} of {:?} lost protected content: {:?} {:?}",
                        target_code, text, validation.errors, validation.warnings
                    );
                }
                Ok(translated)
            }
            Err(e) if e.is_retryable() => {
                metrics.record_soft_failure();
                warn!(
                    "Keeping source text for {} after provider failure ({}): {:?}",
                    target_code, e, text
                );
                Ok(text.to_string())
            }
            Err(e) => Err(e),
        }
    }
}
