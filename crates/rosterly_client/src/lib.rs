//! Minimal `RosterlyApi` trait and basic reqwest-based skeleton.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

pub mod config;
pub mod http_client;

#[derive(Debug, Error)]
pub enum RosterlyError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend error ({status}): {detail}")]
    Api { status: u16, detail: String },
    #[error("configuration error: {0}")]
    Config(String),
}

impl RosterlyError {
    /// Status code of an API-level failure, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            RosterlyError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-supplied detail for an API failure, the transport error text
    /// otherwise.
    pub fn detail(&self) -> String {
        match self {
            RosterlyError::Api { detail, .. } => detail.clone(),
            other => other.to_string(),
        }
    }
}

/// Payload of the backend health endpoint.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct HealthPayload {
    pub status: String,
}

impl HealthPayload {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Single contract for talking to the Rosterly backend.
///
/// Both the readiness prober and the version service go through this trait,
/// so there is exactly one health-check implementation to fake in tests.
/// The prober only cares that `health` returned at all (a success status
/// code); the version service additionally inspects the payload.
#[async_trait]
pub trait RosterlyApi: Send + Sync + 'static {
    async fn health(&self) -> Result<HealthPayload, RosterlyError>;

    /// Fetch the version descriptor. The payload is opaque to callers; the
    /// backend currently returns `{"version_number": "..."}` but nothing
    /// here depends on that shape.
    async fn version(&self) -> Result<serde_json::Value, RosterlyError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::ReqwestRosterlyClient;

    #[tokio::test]
    async fn client_new_and_basic() {
        let client = ReqwestRosterlyClient::new(
            "http://localhost:8000",
            secrecy::SecretString::new("key".into()),
        );
        let _ = client;
    }

    #[test]
    fn health_payload_is_ok_matches_exactly() {
        let ok = HealthPayload { status: "ok".into() };
        assert!(ok.is_ok());
        let other = HealthPayload { status: "OK".into() };
        assert!(!other.is_ok());
        let degraded = HealthPayload { status: "degraded".into() };
        assert!(!degraded.is_ok());
    }

    #[test]
    fn error_detail_prefers_server_detail() {
        let err = RosterlyError::Api {
            status: 500,
            detail: "server overloaded".into(),
        };
        assert_eq!(err.detail(), "server overloaded");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn config_error_has_no_status() {
        let err = RosterlyError::Config("missing key".into());
        assert_eq!(err.status(), None);
        assert!(err.detail().contains("missing key"));
    }
}
