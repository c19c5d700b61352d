//! Directory search: email → user id

use log::debug;

use super::client::{PlatformClient, status_error};
use super::models::{TokenInfo, UserSearchRequest, UserSearchResponse};
use crate::error::ApiError;

impl PlatformClient {
    /// Resolve an email to a user id with a single-result EXACT search.
    ///
    /// `Ok(None)` when the directory has no match. Every call goes to the
    /// remote directory; results are never cached.
    pub async fn find_user_id_by_email(
        &self,
        token: &TokenInfo,
        email: &str,
    ) -> Result<Option<String>, ApiError> {
        let request = UserSearchRequest::exact_email(email);

        let response = self
            .retry
            .execute("users search", || self.search_users(token, &request))
            .await?;

        if let Some(total) = response.total.filter(|total| *total > 1) {
            debug!("{} users match {}, using the first", total, email);
        }

        match response.results.into_iter().next() {
            Some(user) => {
                debug!(
                    "User info for {}: id={} name={:?} email={:?}",
                    email, user.id, user.name, user.email
                );
                Ok(Some(user.id))
            }
            None => {
                debug!("No results for {}", email);
                Ok(None)
            }
        }
    }

    async fn search_users(
        &self,
        token: &TokenInfo,
        request: &UserSearchRequest,
    ) -> Result<UserSearchResponse, ApiError> {
        let response = self
            .http
            .post(self.endpoints.users_search_url())
            .bearer_auth(&token.access_token)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        response
            .json::<UserSearchResponse>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}
