//! HTTP client for the Genesys Cloud platform API
//!
//! One `PlatformClient` is built per batch run. The remote operations live
//! next to their contracts: token exchange in `auth`, directory search in
//! `users`, utilization updates in `utilization`.

use anyhow::{Context, Result};
use reqwest::header::RETRY_AFTER;
use std::time::Duration;

use super::constants::{ROUTING_USERS_PATH, TOKEN_PATH, USER_AGENT, USERS_SEARCH_PATH};
use super::resilience::{ResilienceConfig, RetryPolicy};
use crate::error::ApiError;

/// Base URLs of the login and API hosts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub login_base: String,
    pub api_base: String,
}

impl Endpoints {
    /// `login.<region>` / `api.<region>` over https
    pub fn for_region(region: &str) -> Self {
        let region = region.trim().trim_matches('.');
        Self {
            login_base: format!("https://login.{}", region),
            api_base: format!("https://api.{}", region),
        }
    }

    /// Explicit base URLs (trailing slashes are dropped)
    pub fn new(login_base: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            login_base: login_base.into().trim_end_matches('/').to_string(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn token_url(&self) -> String {
        format!("{}{}", self.login_base, TOKEN_PATH)
    }

    pub fn users_search_url(&self) -> String {
        format!("{}{}", self.api_base, USERS_SEARCH_PATH)
    }

    /// The user id is opaque remote data, so it is percent-encoded as a path segment
    pub fn utilization_url(&self, user_id: &str) -> String {
        format!(
            "{}{}/{}/utilization",
            self.api_base,
            ROUTING_USERS_PATH,
            urlencoding::encode(user_id)
        )
    }
}

/// Authenticated access to the platform endpoints used by a batch
#[derive(Debug, Clone)]
pub struct PlatformClient {
    pub(crate) http: reqwest::Client,
    pub(crate) endpoints: Endpoints,
    pub(crate) retry: RetryPolicy,
}

impl PlatformClient {
    /// Build a client whose every request carries the configured timeout
    pub fn new(endpoints: Endpoints, resilience: &ResilienceConfig) -> Result<Self> {
        let http = build_http_client(resilience.request_timeout)?;
        if resilience.retry.is_enabled() {
            log::debug!(
                "Retrying transient faults up to {} attempts",
                resilience.retry.max_attempts
            );
        }
        Ok(Self::with_http_client(
            endpoints,
            http,
            RetryPolicy::new(resilience.retry.clone()),
        ))
    }

    pub fn with_http_client(endpoints: Endpoints, http: reqwest::Client, retry: RetryPolicy) -> Self {
        Self {
            http,
            endpoints,
            retry,
        }
    }
}

fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to build HTTP client")
}

/// Turn a non-success response into an [`ApiError::Status`]
pub(crate) async fn status_error(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_retry_after);

    ApiError::Status {
        status,
        body: body_text(response).await,
        retry_after,
    }
}

/// Only the delay-seconds form; HTTP-date values are ignored
fn parse_retry_after(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

/// Read a response body for error reporting without failing on bad bodies
pub(crate) async fn body_text(response: reqwest::Response) -> String {
    response
        .text()
        .await
        .unwrap_or_else(|e| format!("<unreadable body: {}>", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_retry_after_seconds_only() {
        assert_eq!(parse_retry_after(" 120 "), Some(Duration::from_secs(120)));
        assert_eq!(parse_retry_after("Wed, 21 Oct 2026 07:28:00 GMT"), None);
    }

    #[test]
    fn test_region_endpoints() {
        let endpoints = Endpoints::for_region("mypurecloud.ie");

        assert_eq!(endpoints.token_url(), "https://login.mypurecloud.ie/oauth/token");
        assert_eq!(
            endpoints.users_search_url(),
            "https://api.mypurecloud.ie/api/v2/users/search"
        );
    }

    #[test]
    fn test_utilization_url_encodes_user_id() {
        let endpoints = Endpoints::new("http://login.test/", "http://api.test/");

        assert_eq!(
            endpoints.utilization_url("u-1"),
            "http://api.test/api/v2/routing/users/u-1/utilization"
        );
        assert_eq!(
            endpoints.utilization_url("a/b"),
            "http://api.test/api/v2/routing/users/a%2Fb/utilization"
        );
    }

    #[test]
    fn test_client_builds_with_timeout() {
        let resilience = ResilienceConfig::builder()
            .request_timeout(Duration::from_secs(2))
            .build();
        let client = PlatformClient::new(Endpoints::for_region("mypurecloud.com"), &resilience);
        assert!(client.is_ok());
    }
}
