// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Router construction and server startup

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::detect::{detect_base64_handler, detect_handler};
use super::handlers::{classes_handler, health_handler, root_handler};
use crate::config::AppConfig;
use crate::detection::DetectionCascade;

/// Shared request state: immutable configuration plus the wired cascade.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub cascade: Arc<DetectionCascade>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, cascade: Arc<DetectionCascade>) -> Self {
        Self { config, cascade }
    }
}

/// Build the router. Separate from [`start_server`] so tests can drive the
/// app without binding a socket.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/classes", get(classes_handler))
        .route("/detect", post(detect_handler))
        .route("/detect/base64", post(detect_base64_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Wire the cascade from configuration and serve until shutdown.
pub async fn start_server(config: AppConfig) -> anyhow::Result<()> {
    let config = Arc::new(config);
    let cascade = Arc::new(DetectionCascade::from_config(&config)?);
    let state = AppState::new(config.clone(), cascade);

    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("API server listening on {}", config.listen_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
