//! Version descriptor fetch with a single-slot cache.
//!
//! The backend exposes its deployed version at `/options/version/list`. The
//! value changes only on redeploy, so a fetch-once cache is enough; there is
//! no TTL, the entry stays valid until a new fetch overwrites it.
//!
//! Error handling is centralized here: a failed fetch first asks the health
//! endpoint whether the backend is up at all. If it is not, the failure is
//! expected noise (the readiness prober will catch the recovery) and gets
//! suppressed; if the backend is healthy the failure is a real problem, so
//! it is logged in full, surfaced to the user via the notification sink, and
//! raised to the caller.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::{AppError, AppResult};
use crate::notify::{NotificationSink, Severity};
use rosterly_client::{RosterlyApi, RosterlyError};

/// The one cache key this service manages.
pub const VERSION_CACHE_KEY: &str = "version";

/// What to report when the health check itself cannot be reached.
///
/// The product has always treated an unreachable health endpoint as healthy,
/// which makes version-fetch failures surface loudly even when the backend is
/// simply down. `FailClosed` is the corrected reading; `FailOpen` stays the
/// default to keep the shipped behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HealthCheckPolicy {
    FailOpen,
    FailClosed,
}

struct CacheEntry {
    value: serde_json::Value,
    fetched_at: DateTime<Utc>,
}

pub struct VersionService {
    api: Arc<dyn RosterlyApi>,
    sink: Arc<dyn NotificationSink>,
    cache: Mutex<Option<CacheEntry>>,
    policy: HealthCheckPolicy,
}

impl VersionService {
    pub fn new(api: Arc<dyn RosterlyApi>, sink: Arc<dyn NotificationSink>) -> Self {
        Self::with_policy(api, sink, HealthCheckPolicy::FailOpen)
    }

    pub fn with_policy(
        api: Arc<dyn RosterlyApi>,
        sink: Arc<dyn NotificationSink>,
        policy: HealthCheckPolicy,
    ) -> Self {
        Self {
            api,
            sink,
            cache: Mutex::new(None),
            policy,
        }
    }

    /// Cached version descriptor, fetching on a miss.
    ///
    /// `Ok(None)` is the suppressed-failure outcome and is deliberately
    /// ambiguous: the backend may be down, or there may be no version data.
    pub async fn get_version(&self) -> AppResult<Option<serde_json::Value>> {
        if let Some(entry) = self.cache.lock().await.as_ref() {
            return Ok(Some(entry.value.clone()));
        }
        // No single-flight: concurrent first calls may each fetch, last
        // write wins.
        self.fetch_and_cache().await
    }

    /// Warm the cache when it is empty. Never yields the value; fetch
    /// failures have already gone through the centralized handling (log,
    /// health gate, notification) and are not re-raised here.
    pub async fn prefetch_version(&self) {
        if self.cache.lock().await.is_some() {
            return;
        }
        if let Err(err) = self.fetch_and_cache().await {
            tracing::debug!(error = %err, "version prefetch failed");
        }
    }

    /// When the cache was last populated.
    pub async fn cached_at(&self) -> Option<DateTime<Utc>> {
        self.cache.lock().await.as_ref().map(|e| e.fetched_at)
    }

    /// One-shot health check used to gate error visibility. A reachable
    /// endpoint is healthy iff the payload status is exactly "ok"; an
    /// unreachable one answers per [`HealthCheckPolicy`].
    pub async fn backend_healthy(&self) -> bool {
        match self.api.health().await {
            Ok(payload) => payload.is_ok(),
            Err(err) => {
                tracing::debug!(error = %err, "health check request failed");
                matches!(self.policy, HealthCheckPolicy::FailOpen)
            }
        }
    }

    async fn fetch_and_cache(&self) -> AppResult<Option<serde_json::Value>> {
        match self.api.version().await {
            Ok(value) => {
                let mut slot = self.cache.lock().await;
                *slot = Some(CacheEntry {
                    value: value.clone(),
                    fetched_at: Utc::now(),
                });
                tracing::debug!(key = VERSION_CACHE_KEY, "version cached");
                Ok(Some(value))
            }
            Err(err) => self.handle_fetch_error(err).await,
        }
    }

    async fn handle_fetch_error(&self, err: RosterlyError) -> AppResult<Option<serde_json::Value>> {
        if !self.backend_healthy().await {
            tracing::warn!("backend is not healthy, suppressing version fetch error");
            return Ok(None);
        }
        match &err {
            RosterlyError::Api { status, detail } => {
                tracing::error!(status = *status, detail = %detail, "version endpoint returned an error");
            }
            other => {
                tracing::error!(error = %other, "version request failed");
            }
        }
        let message = format!("Version not fetched: {}", err.detail());
        self.sink.notify(&message, Severity::Error);
        Err(AppError::Version(message))
    }
}
