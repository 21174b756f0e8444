//! Bot Status Webhook Service - Binary Entry Point

use std::net::SocketAddr;
use std::sync::Arc;

use bot_status::logging::init_logging;
use bot_status::{create_router, AppState, ServerConfig};
use tracing::{error, info, warn};

type MainResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> MainResult<()> {
    init_logging();

    let config = ServerConfig::from_env()?;
    let state = Arc::new(AppState::from_config(&config));

    if let Some(previous) = state.engine.snapshot().load() {
        info!(bots = previous.len(), "found previous bot snapshot");
    }

    // Rebuild the snapshot from the log before taking traffic
    let records = state.store.read_all();
    let refresh = state.engine.refresh(&records);
    if let Some(e) = &refresh.snapshot_error {
        warn!(error = %e, "startup snapshot not written");
    }
    info!(
        log = %config.log_file.display(),
        records = records.len(),
        bots = refresh.bots.len(),
        "replayed request log"
    );

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!(address = %config.bind_address(), "bot status server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
