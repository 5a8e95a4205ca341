use std::sync::Arc;

use rosterly_app::AppServices;
use rosterly_app::notify::ChannelSink;
use rosterly_client::config::Config;
use rosterly_client::http_client::ReqwestRosterlyClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configure logging from env var `ROSTERLY_LOG_LEVEL` (or fallback to `RUST_LOG`, default `info`).
    let log_env = std::env::var("ROSTERLY_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());

    let env_filter = tracing_subscriber::EnvFilter::try_new(&log_env)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
    tracing::info!("rosterly_app: log filter: {}", log_env);

    let config = Config::from_env()?;
    let client = ReqwestRosterlyClient::new(&config.base_url, config.api_key);

    let (sink, mut notifications) = ChannelSink::new();
    tokio::spawn(async move {
        while let Some(n) = notifications.recv().await {
            tracing::warn!(severity = n.severity.as_str(), "{}", n.message);
        }
    });

    let mut services = AppServices::start(Arc::new(client), Arc::new(sink));

    tracing::info!("rosterly_app: waiting for backend at {}", config.base_url);
    services.readiness.wait_ready().await;

    services.versions.prefetch_version().await;
    match services.versions.get_version().await? {
        Some(version) => tracing::info!("rosterly_app: backend version: {}", version),
        None => tracing::warn!("rosterly_app: no version data available"),
    }

    Ok(())
}
