//! Server startup and shutdown

use super::{build_router, ResolutionService};
use crate::config::EnvzeroConfig;
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Binds the configured address and serves until Ctrl-C
pub async fn serve(config: &EnvzeroConfig) -> Result<()> {
    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    serve_on(listener, config.max_concurrent_resolutions).await
}

/// Serves on an already bound listener
pub async fn serve_on(listener: TcpListener, max_concurrent_resolutions: usize) -> Result<()> {
    let service = Arc::new(ResolutionService::new(max_concurrent_resolutions));
    let app = build_router(service);

    let local_addr = listener.local_addr().context("Listener has no local address")?;
    info!(
        address = %local_addr,
        max_concurrent_resolutions,
        "EnvZero orchestrator listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("EnvZero orchestrator stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
