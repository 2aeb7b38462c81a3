use anyhow::Context;
use scorecard_api_rest::{create_app, ApiConfig};
use scorecard_common::{init_from_config, AppConfig};
use std::net::SocketAddr;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_config = AppConfig::load()?;
    init_from_config(&app_config.telemetry)?;

    let config = ApiConfig::from(&app_config);
    let address = config.server_address();

    let app = create_app(config);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!(address = %address, version = env!("CARGO_PKG_VERSION"), "Scorecard API listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    info!("Scorecard API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
