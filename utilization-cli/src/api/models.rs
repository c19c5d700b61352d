//! Wire types for the Genesys Cloud platform API

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::batch::Channel;

/// Bearer token obtained through the client-credentials grant.
///
/// There is no refresh; one token serves a whole batch.
#[derive(Clone)]
pub struct TokenInfo {
    pub access_token: String,
    pub token_type: Option<String>,
    pub expires_in: Option<u64>,
    pub obtained_at: Instant,
}

impl TokenInfo {
    pub fn new(access_token: impl Into<String>, expires_in: Option<u64>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: None,
            expires_in,
            obtained_at: Instant::now(),
        }
    }

    /// Whether the lifetime announced by the token endpoint has passed
    pub fn is_expired(&self) -> bool {
        match self.expires_in {
            Some(secs) => self.obtained_at.elapsed() >= Duration::from_secs(secs),
            None => false,
        }
    }
}

impl std::fmt::Debug for TokenInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenInfo")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Body of a successful token endpoint response
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// `POST /api/v2/users/search` request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSearchRequest {
    pub page_size: u32,
    pub page_number: u32,
    pub query: Vec<SearchCriteria>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchCriteria {
    #[serde(rename = "type")]
    pub match_type: String,
    pub fields: Vec<String>,
    pub value: String,
}

impl UserSearchRequest {
    /// Single-result EXACT match on the `email` field
    pub fn exact_email(email: &str) -> Self {
        Self {
            page_size: 1,
            page_number: 1,
            query: vec![SearchCriteria {
                match_type: "EXACT".to_string(),
                fields: vec!["email".to_string()],
                value: email.to_string(),
            }],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserSearchResponse {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub results: Vec<UserSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserSummary {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Capacity settings for one channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaUtilization {
    pub maximum_capacity: u32,
    pub interruptable_media_types: Vec<String>,
    pub include_non_acd: bool,
}

/// `PUT /api/v2/routing/users/{userId}/utilization` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtilizationPayload {
    pub utilization: BTreeMap<Channel, MediaUtilization>,
}

impl UtilizationPayload {
    pub fn get(&self, channel: Channel) -> Option<&MediaUtilization> {
        self.utilization.get(&channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_request_shape() {
        let request = UserSearchRequest::exact_email("a@x.com");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "pageSize": 1,
                "pageNumber": 1,
                "query": [{"type": "EXACT", "fields": ["email"], "value": "a@x.com"}]
            })
        );
    }

    #[test]
    fn test_search_response_without_results() {
        let response: UserSearchResponse =
            serde_json::from_value(json!({"total": 0, "pageCount": 0})).unwrap();
        assert!(response.results.is_empty());
    }

    #[test]
    fn test_payload_shape() {
        let mut utilization = BTreeMap::new();
        utilization.insert(
            Channel::Workitem,
            MediaUtilization {
                maximum_capacity: 2,
                interruptable_media_types: vec![],
                include_non_acd: true,
            },
        );
        let payload = UtilizationPayload { utilization };

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "utilization": {
                    "workitem": {
                        "maximumCapacity": 2,
                        "interruptableMediaTypes": [],
                        "includeNonAcd": true
                    }
                }
            })
        );
    }

    #[test]
    fn test_token_debug_redacts_secret() {
        let token = TokenInfo::new("secret-value", Some(86400));
        let debug = format!("{:?}", token);
        assert!(!debug.contains("secret-value"));
        assert!(!token.is_expired());
    }

    #[test]
    fn test_token_expiry() {
        assert!(TokenInfo::new("t", Some(0)).is_expired());
        assert!(!TokenInfo::new("t", None).is_expired());
    }
}
