//! Resilience configuration with builder pattern
//!
//! Groups the request timeout, the opt-in retry policy and the number of
//! rows processed concurrently. Defaults reproduce a strictly sequential,
//! single-attempt run.

use super::retry::RetryConfig;
use crate::config::Config;
use std::time::Duration;

/// Global resilience configuration for a batch run
#[derive(Debug, Clone, PartialEq)]
pub struct ResilienceConfig {
    pub retry: RetryConfig,
    pub concurrency: ConcurrencyConfig,
    /// Applied to every remote call (token, search, update)
    pub request_timeout: Duration,
}

/// Row-level concurrency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcurrencyConfig {
    /// Rows in flight at once; 1 means strictly sequential
    pub workers: usize,
}

impl Default for ConcurrencyConfig {
    fn default() -> Self {
        Self { workers: 1 }
    }
}

impl Default for ResilienceConfig {
    fn default() -> Self {
        Self {
            retry: RetryConfig::default(),
            concurrency: ConcurrencyConfig::default(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ResilienceConfig {
    /// Create a new builder for ResilienceConfig
    pub fn builder() -> ResilienceConfigBuilder {
        ResilienceConfigBuilder::new()
    }

    /// Build from the `[api]`, `[batch]` and `[retry]` config sections
    pub fn from_config(config: &Config) -> Self {
        Self {
            retry: RetryConfig {
                max_attempts: config.retry.max_attempts.max(1),
                base_delay: Duration::from_millis(config.retry.base_delay_ms),
                max_delay: Duration::from_millis(config.retry.max_delay_ms),
                backoff_multiplier: config.retry.backoff_multiplier,
                jitter: config.retry.jitter,
            },
            concurrency: ConcurrencyConfig {
                workers: config.batch.workers.max(1),
            },
            request_timeout: Duration::from_secs(config.api.timeout_secs),
        }
    }
}

/// Builder for ResilienceConfig
#[derive(Debug)]
pub struct ResilienceConfigBuilder {
    config: ResilienceConfig,
}

impl ResilienceConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ResilienceConfig::default(),
        }
    }

    /// Configure retry behavior
    pub fn retry_config(mut self, retry: RetryConfig) -> Self {
        self.config.retry = retry;
        self
    }

    /// Set total attempts for transient faults (1 disables retry)
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config.retry.max_attempts = attempts.max(1);
        self
    }

    /// Set the number of rows processed concurrently
    pub fn workers(mut self, workers: usize) -> Self {
        self.config.concurrency.workers = workers.max(1);
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> ResilienceConfig {
        self.config
    }
}

impl Default for ResilienceConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
