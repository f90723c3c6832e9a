//! Read-only introspection endpoint.
//!
//! Serves the monitor's published status snapshot over HTTP for operator
//! tooling (`pingcheck-cli`). Binds loopback by default; there is no
//! authentication, so keep it there.

pub mod handlers;

use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use self::handlers::{get_health, get_status};
use crate::health::status::StatusBoard;

pub fn admin_router(board: Arc<StatusBoard>) -> Router {
    Router::new()
        .route("/status", get(get_status))
        .route("/health", get(get_health))
        .with_state(board)
}

/// Serve the endpoint until the shutdown signal fires.
pub async fn run(
    bind_address: &str,
    board: Arc<StatusBoard>,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<(), std::io::Error> {
    let addr: SocketAddr = bind_address
        .parse()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(address = %listener.local_addr()?, "Admin endpoint listening");

    axum::serve(listener, admin_router(board))
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
        })
        .await?;

    tracing::info!("Admin endpoint stopped");
    Ok(())
}
