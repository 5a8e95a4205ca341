//! Application-side services for the Rosterly frontend core: backend
//! readiness probing, the cached version query, and user notifications.

use std::sync::Arc;

pub mod error;
pub mod notify;
pub mod readiness;
pub mod version;

mod test_utils;

pub use error::{AppError, AppResult};

use notify::NotificationSink;
use readiness::{Readiness, ReadinessProber};
use rosterly_client::RosterlyApi;
use version::VersionService;

/// The services built once at startup and handed to consumers. All
/// process-wide state (the readiness flag, the version cache slot) lives
/// inside these objects, not in module globals, so tests can construct
/// isolated instances.
pub struct AppServices {
    pub readiness: Readiness,
    pub versions: Arc<VersionService>,
}

impl AppServices {
    /// Wire the services over a shared API client and spawn the readiness
    /// prober. Equivalent of application mount: call it once.
    pub fn start(api: Arc<dyn RosterlyApi>, sink: Arc<dyn NotificationSink>) -> Self {
        let (prober, readiness) = ReadinessProber::new(api.clone());
        tokio::spawn(prober.run());
        let versions = Arc::new(VersionService::new(api, sink));
        Self {
            readiness,
            versions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::ChannelSink;
    use crate::test_utils::MockApi;
    use serde_json::json;

    #[tokio::test]
    async fn start_wires_prober_and_version_service() {
        let api = Arc::new(MockApi::new(
            vec![Ok(crate::test_utils::health_ok())],
            vec![Ok(json!({"version_number": "1.0.0"}))],
        ));
        let (sink, _rx) = ChannelSink::new();

        let mut services = AppServices::start(api, Arc::new(sink));
        services.readiness.wait_ready().await;
        assert!(services.readiness.is_ready());

        let v = services.versions.get_version().await.expect("version");
        assert_eq!(v, Some(json!({"version_number": "1.0.0"})));
    }
}
