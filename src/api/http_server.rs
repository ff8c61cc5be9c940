// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::download::download_handler;
use super::generate::generate_handler;
use super::variations::variations_handler;
use crate::config::DEFAULT_STORAGE_HOST_SUFFIX;
use crate::provider::{ImageFetcher, ImageProvider};

/// Capabilities shared by every handler. Nothing here is mutable.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn ImageProvider>,
    pub fetcher: Arc<dyn ImageFetcher>,
    pub storage_host_suffix: Arc<str>,
}

impl AppState {
    pub fn new(provider: Arc<dyn ImageProvider>, fetcher: Arc<dyn ImageFetcher>) -> Self {
        Self {
            provider,
            fetcher,
            storage_host_suffix: Arc::from(DEFAULT_STORAGE_HOST_SUFFIX),
        }
    }

    pub fn with_storage_host_suffix(mut self, suffix: &str) -> Self {
        self.storage_host_suffix = Arc::from(suffix);
        self
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Image endpoints
        .route("/generate", post(generate_handler))
        .route("/variations", post(variations_handler))
        .route("/download", get(download_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Serve until the process receives Ctrl-C
pub async fn start_server(
    state: AppState,
    addr: SocketAddr,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received, draining connections");
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}
