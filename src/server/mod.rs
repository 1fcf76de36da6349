// src/server/mod.rs
// =============================================================================
// This module exposes the search over HTTP with axum.
//
// Nothing here is global: `build_router` takes an explicit `AppState` and
// `serve` binds a listener and runs that router until Ctrl-C.
// =============================================================================

mod routes;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::search::SearchAggregator;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: SearchAggregator,
}

impl AppState {
    pub fn new(aggregator: SearchAggregator) -> Self {
        Self { aggregator }
    }
}

/// Builds the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(routes::ping))
        .route("/api/v1/search", post(routes::search))
        .with_state(state)
}

/// Serves the API on `addr` until the process receives Ctrl-C.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!(%addr, "listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(e) => {
            // Without a signal handler, keep serving until killed
            warn!(error = %e, "could not listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    }
}
