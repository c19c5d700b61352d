//! OAuth client-credentials token exchange

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::client::{PlatformClient, body_text};
use super::models::{TokenInfo, TokenResponse};
use crate::error::AuthError;

/// OAuth client credentials for the platform.
///
/// The [`Debug`] impl redacts the secret.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.client_id.trim().is_empty() && !self.client_secret.trim().is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

impl PlatformClient {
    /// Exchange client credentials for a bearer token.
    ///
    /// Never retried: without a token there is no batch.
    pub async fn obtain_token(&self, credentials: &Credentials) -> Result<TokenInfo, AuthError> {
        let url = self.endpoints.token_url();
        debug!("Requesting OAuth token from {}", url);

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
        ];

        let response = self
            .http
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                body: body_text(response).await,
            });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;

        if token.access_token.is_empty() {
            return Err(AuthError::MalformedResponse(
                "access_token is empty".to_string(),
            ));
        }

        info!(
            "Obtained OAuth token (expires in {})",
            token
                .expires_in
                .map(|s| format!("{}s", s))
                .unwrap_or_else(|| "unknown".to_string())
        );

        let mut info = TokenInfo::new(token.access_token, token.expires_in);
        info.token_type = token.token_type;
        Ok(info)
    }
}
