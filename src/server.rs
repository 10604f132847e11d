//! HTTP server lifecycle

use crate::config::ServerConfig;
use crate::shutdown::shutdown_signal;
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

/// Bind `host:port` and serve `app` until Ctrl+C / SIGTERM
pub async fn start_server(config: &ServerConfig, app: Router) -> anyhow::Result<()> {
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
