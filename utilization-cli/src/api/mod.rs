//! Genesys Cloud platform API
//!
//! Thin, typed access to the three remote operations a utilization batch
//! needs: the client-credentials token exchange, the exact-match user
//! search and the per-user utilization PUT. Timeouts and the opt-in retry
//! policy live in [`resilience`].

pub mod auth;
pub mod client;
pub mod constants;
pub mod models;
pub mod resilience;
pub mod users;
pub mod utilization;

pub use auth::Credentials;
pub use client::{Endpoints, PlatformClient};
pub use models::{TokenInfo, UtilizationPayload};
pub use resilience::ResilienceConfig;
