//! Per-user routing utilization updates

use log::debug;
use reqwest::StatusCode;

use super::client::{PlatformClient, status_error};
use super::models::{TokenInfo, UtilizationPayload};
use crate::error::ApiError;

impl PlatformClient {
    /// PUT the utilization payload for one user.
    ///
    /// Only HTTP 200 counts as success; any other status comes back with
    /// the raw response body for the operator to read.
    pub async fn update_utilization(
        &self,
        token: &TokenInfo,
        user_id: &str,
        payload: &UtilizationPayload,
    ) -> Result<(), ApiError> {
        let url = self.endpoints.utilization_url(user_id);
        debug!("Updating user utilization at endpoint: {}", url);
        if log::log_enabled!(log::Level::Trace) {
            log::trace!(
                "Payload: {}",
                serde_json::to_string_pretty(payload).unwrap_or_default()
            );
        }

        self.retry
            .execute("utilization update", || self.put_utilization(&url, token, payload))
            .await
    }

    async fn put_utilization(
        &self,
        url: &str,
        token: &TokenInfo,
        payload: &UtilizationPayload,
    ) -> Result<(), ApiError> {
        let response = self
            .http
            .put(url)
            .bearer_auth(&token.access_token)
            .json(payload)
            .send()
            .await?;

        if response.status() == StatusCode::OK {
            return Ok(());
        }

        Err(status_error(response).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::Endpoints;
    use crate::api::resilience::RetryPolicy;
    use crate::batch::fixtures::full_row;
    use crate::batch::transform::transform;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> PlatformClient {
        PlatformClient::with_http_client(
            Endpoints::new(server.uri(), server.uri()),
            reqwest::Client::new(),
            RetryPolicy::default(),
        )
    }

    #[tokio::test]
    async fn test_update_sends_bearer_and_payload() {
        let server = MockServer::start().await;
        let payload = transform(&full_row("a@x.com", [1, 2, 3, 4, 5, 2])).unwrap();

        Mock::given(method("PUT"))
            .and(path("/api/v2/routing/users/u-1/utilization"))
            .and(header("Authorization", "Bearer tok-123"))
            .and(header("Content-Type", "application/json"))
            .and(body_partial_json(json!({
                "utilization": {
                    "email": {"maximumCapacity": 1, "includeNonAcd": false},
                    "workitem": {"maximumCapacity": 2, "includeNonAcd": true}
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .update_utilization(&TokenInfo::new("tok-123", None), "u-1", &payload)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_non_200_passes_body_through() {
        let server = MockServer::start().await;
        let payload = transform(&full_row("a@x.com", [1; 6])).unwrap();

        Mock::given(method("PUT"))
            .and(path("/api/v2/routing/users/u-1/utilization"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .expect(1)
            .mount(&server)
            .await;

        let err = client(&server)
            .update_utilization(&TokenInfo::new("tok-123", None), "u-1", &payload)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "403, forbidden");
    }

    #[tokio::test]
    async fn test_other_success_codes_are_not_success() {
        let server = MockServer::start().await;
        let payload = transform(&full_row("a@x.com", [1; 6])).unwrap();

        Mock::given(method("PUT"))
            .and(path("/api/v2/routing/users/u-1/utilization"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let err = client(&server)
            .update_utilization(&TokenInfo::new("tok-123", None), "u-1", &payload)
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(204));
    }
}
