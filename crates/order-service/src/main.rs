use anyhow::Context;
use clap::Parser;
use order_service::config::{CliArgs, ServiceConfig};
use order_service::http::{self, AppState};
use order_service::lifecycle::{setup_tracing, OrderSystem};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::from_args(CliArgs::parse())?;
    config.validate()?;

    setup_tracing(config.log_format);
    info!(?config, "Starting order service");

    let system = OrderSystem::with_capacity(&config.database_url, config.channel_capacity)
        .await
        .with_context(|| format!("failed to open {}", config.database_url))?;
    let app = http::router(AppState {
        orders: system.order_client.clone(),
    });

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!(addr = %config.bind, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    system.shutdown().await.map_err(anyhow::Error::msg)?;
    info!("Order service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
