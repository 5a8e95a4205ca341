//! HTTP client implementation for the Rosterly backend API.
//!
//! This module provides a reqwest-based implementation of the
//! [`RosterlyApi`](crate::RosterlyApi) trait.

use crate::{HealthPayload, RosterlyApi, RosterlyError};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

/// Client for the Rosterly backend API using reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestRosterlyClient {
    base_url: String,
    api_key: SecretString,
    client: reqwest::Client,
}

impl ReqwestRosterlyClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the backend (e.g., "http://localhost:8000")
    /// * `api_key` - The API key sent as a bearer credential
    pub fn new(base_url: &str, api_key: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("reqwest client build should not fail");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        }
    }

    /// Build an authenticated GET request.
    fn get_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .bearer_auth(self.api_key.expose_secret())
            .header(reqwest::header::ACCEPT, "application/json")
    }

    /// Execute a request and expect a JSON response.
    async fn execute_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, RosterlyError> {
        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "backend request failed");
            return Err(Self::error_from_response(resp).await);
        }
        Ok(resp.json::<T>().await?)
    }

    /// Extract error information from a failed response. The backend puts a
    /// human-readable message in a `detail` field of the JSON error body.
    async fn error_from_response(resp: reqwest::Response) -> RosterlyError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("detail")
                    .and_then(|d| d.as_str())
                    .map(|s| s.to_string())
            })
            .unwrap_or_else(|| body.chars().take(256).collect());
        RosterlyError::Api { status, detail }
    }
}

#[async_trait]
impl RosterlyApi for ReqwestRosterlyClient {
    async fn health(&self) -> Result<HealthPayload, RosterlyError> {
        let url = format!("{}/api/v1/options/health/", self.base_url);
        let resp = self.get_request(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "backend request failed");
            return Err(Self::error_from_response(resp).await);
        }
        // A success status alone means the backend answered; readiness keys
        // off that. A missing or malformed payload simply is not "ok".
        Ok(resp
            .json::<HealthPayload>()
            .await
            .unwrap_or_else(|_| HealthPayload {
                status: String::new(),
            }))
    }

    async fn version(&self) -> Result<serde_json::Value, RosterlyError> {
        let url = format!("{}/api/v1/options/version/list", self.base_url);
        self.execute_json(self.get_request(&url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::ReqwestRosterlyClient;
    use secrecy::SecretString;

    #[test]
    fn new_trims_trailing_slash() {
        let client =
            ReqwestRosterlyClient::new("http://localhost:8000/", SecretString::new("key".into()));
        assert_eq!(client.base_url, "http://localhost:8000");
    }
}
