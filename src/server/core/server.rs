use std::net::SocketAddr;
use log::{error, info};
use tokio::net::TcpListener;
use tokio::signal;

use crate::config::SiteConfig;
use crate::server::app::create_app;
use crate::utils::error::BoxResult;

/// Serve the public directory on every interface until Ctrl+C
pub async fn serve(config: &SiteConfig) -> BoxResult<()> {
    let public_dir = config.public_dir();
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    let listener = TcpListener::bind(addr).await?;
    info!("Serving files from {}", public_dir.display());
    info!("Server running at http://{}", addr);

    axum::serve(listener, create_app(public_dir))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutting down server (received Ctrl+C)..."),
        Err(e) => error!("Failed to listen for Ctrl+C: {}", e),
    }
}
