//! Opt-in retry with exponential backoff
//!
//! The default configuration makes exactly one attempt. Only transient
//! faults (HTTP 429, 5xx, no response) are ever retried.

use log::{debug, warn};
use rand::Rng;
use std::future::Future;
use std::time::Duration;

use crate::error::ApiError;

/// Retry settings
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Total attempts including the first one (1 = no retries)
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    /// Scale each delay by a random factor in [0.5, 1.0)
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    pub fn is_enabled(&self) -> bool {
        self.max_attempts > 1
    }
}

/// Executes remote calls under a [`RetryConfig`]
#[derive(Debug, Clone, Default)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Whether another attempt should follow the failed attempt number `attempt` (0-based)
    pub fn should_retry(&self, attempt: u32, error: &ApiError) -> bool {
        attempt + 1 < self.config.max_attempts && error.is_transient()
    }

    /// Backoff before attempt `attempt + 1`, before jitter is applied
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = self.config.backoff_multiplier.max(1.0).powi(attempt as i32);
        let delay_ms = self.config.base_delay.as_millis() as f64 * factor;
        let capped_ms = delay_ms.min(self.config.max_delay.as_millis() as f64);
        Duration::from_millis(capped_ms.round() as u64)
    }

    /// Jittered backoff, never shorter than the server's `Retry-After`
    fn delay_before_retry(&self, attempt: u32, error: &ApiError) -> Duration {
        let backoff = self.jittered(self.delay_for(attempt));
        match error.retry_after() {
            Some(retry_after) => backoff.max(retry_after),
            None => backoff,
        }
    }

    fn jittered(&self, delay: Duration) -> Duration {
        if !self.config.jitter || delay.is_zero() {
            return delay;
        }
        let scale: f64 = rand::rng().random_range(0.5..1.0);
        delay.mul_f64(scale)
    }

    /// Run `f` until it succeeds, fails permanently, or attempts run out.
    pub async fn execute<F, Fut, T>(&self, operation: &str, mut f: F) -> Result<T, ApiError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let mut attempt: u32 = 0;
        loop {
            match f().await {
                Ok(value) => {
                    if attempt > 0 {
                        debug!("{} succeeded after {} attempts", operation, attempt + 1);
                    }
                    return Ok(value);
                }
                Err(error) if self.should_retry(attempt, &error) => {
                    let delay = self.delay_before_retry(attempt, &error);
                    debug!(
                        "{} failed ({}), retrying in {:?} (attempt {}/{})",
                        operation,
                        error,
                        delay,
                        attempt + 2,
                        self.config.max_attempts
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => {
                    if attempt > 0 {
                        warn!(
                            "{} failed after {} attempts: {}",
                            operation,
                            attempt + 1,
                            error
                        );
                    }
                    return Err(error);
                }
            }
        }
    }
}
