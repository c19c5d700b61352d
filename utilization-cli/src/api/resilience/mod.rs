//! Request timeouts, opt-in retry and row concurrency
//!
//! Nothing here changes observable behavior unless configured: the
//! defaults are one attempt per call and one row at a time.

pub mod config;
pub mod retry;

pub use config::ResilienceConfig;
pub use retry::RetryPolicy;
