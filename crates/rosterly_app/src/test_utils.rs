//! Shared test utilities: a scripted mock `RosterlyApi` used by unit tests.
//!
//! Keep this module `#[cfg(test)]`-only so it never ships in the library.
#![cfg(test)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::sync::Mutex;

use rosterly_client::{HealthPayload, RosterlyApi, RosterlyError};

/// Stand-in for a transport-level failure (connection refused, timeout).
pub fn transport_err() -> RosterlyError {
    RosterlyError::Config("connection refused".into())
}

pub fn api_err(status: u16, detail: &str) -> RosterlyError {
    RosterlyError::Api {
        status,
        detail: detail.into(),
    }
}

pub fn health_ok() -> HealthPayload {
    HealthPayload {
        status: "ok".into(),
    }
}

/// Scripted mock: each call pops the next queued response and counts the
/// attempt. An exhausted script is an error so tests fail loudly instead of
/// hanging on surprise extra calls.
pub struct MockApi {
    health_script: Mutex<VecDeque<Result<HealthPayload, RosterlyError>>>,
    version_script: Mutex<VecDeque<Result<serde_json::Value, RosterlyError>>>,
    pub health_calls: AtomicU32,
    pub version_calls: AtomicU32,
}

impl MockApi {
    pub fn new(
        health: Vec<Result<HealthPayload, RosterlyError>>,
        version: Vec<Result<serde_json::Value, RosterlyError>>,
    ) -> Self {
        Self {
            health_script: Mutex::new(health.into()),
            version_script: Mutex::new(version.into()),
            health_calls: AtomicU32::new(0),
            version_calls: AtomicU32::new(0),
        }
    }

    /// `n` transport failures followed by a healthy response.
    pub fn health_failures_then_ok(n: u32) -> Self {
        let mut script: Vec<Result<HealthPayload, RosterlyError>> =
            (0..n).map(|_| Err(transport_err())).collect();
        script.push(Ok(health_ok()));
        Self::new(script, vec![])
    }
}

#[async_trait]
impl RosterlyApi for MockApi {
    async fn health(&self) -> Result<HealthPayload, RosterlyError> {
        self.health_calls.fetch_add(1, Ordering::SeqCst);
        self.health_script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(RosterlyError::Config("mock health script exhausted".into())))
    }

    async fn version(&self) -> Result<serde_json::Value, RosterlyError> {
        self.version_calls.fetch_add(1, Ordering::SeqCst);
        self.version_script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(RosterlyError::Config("mock version script exhausted".into())))
    }
}
