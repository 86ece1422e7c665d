//! # itax-api: Binary Entry Point
//!
//! Starts the Axum HTTP server. Binds to `0.0.0.0:$PORT` (default 5000).

use std::net::SocketAddr;

use itax_api::config::AppConfig;
use itax_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    itax_api::telemetry::init_tracing(config.log_format);
    tracing::debug!(?config, "loaded configuration");

    let mut state = AppState::new();

    if config.metrics_enabled {
        match itax_api::middleware::metrics::install_recorder() {
            Ok(handle) => state = state.with_metrics(handle),
            Err(e) => tracing::warn!("Prometheus recorder not installed: {e}"),
        }
    }

    let store = itax_api::db::init_store(&config.store).await.map_err(|e| {
        tracing::error!("Submission store initialization failed: {e}");
        e
    })?;
    if let Some(store) = store {
        state = state.with_store(store);
    }

    let app = itax_api::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server is running on http://localhost:{}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
