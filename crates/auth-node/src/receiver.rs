//! Verifying HTTP receiver.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use auth_gateway::{AuthenticatedService, SignatureAuthLayer};
use axum::{routing::get, Json, Router};
use hmac_auth::RequestVerificationApi;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Routes: `GET /internal/status` (signed) and `GET /health` (open).
pub fn router(verifier: impl RequestVerificationApi + 'static) -> Router {
    Router::new()
        .route("/internal/status", get(status))
        .route_layer(SignatureAuthLayer::new(verifier))
        .route("/health", get(health))
}

async fn status(AuthenticatedService(caller): AuthenticatedService) -> Json<Value> {
    info!(service = %caller, "Status requested");
    Json(json!({ "ok": true, "from": caller }))
}

async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// Serve until Ctrl-C.
pub async fn serve(bind: SocketAddr, verifier: impl RequestVerificationApi + 'static) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    info!(addr = %bind, "Receiver listening");

    axum::serve(listener, router(verifier))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("receiver terminated with an error")?;

    info!("Receiver stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
