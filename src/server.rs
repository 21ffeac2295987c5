//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{Path, State},
    http::header::CONNECTION,
    response::Response,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::api;
use crate::assets::AssetLoader;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::{FrameCache, RenderService};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub loader: Arc<AssetLoader>,
    pub renderer: Arc<RenderService>,
    pub frame_cache: Arc<FrameCache>,
}

/// Create application state from an asset loader.
pub fn create_app_state(asset_loader: Arc<AssetLoader>) -> anyhow::Result<AppState> {
    let config = Arc::new(AppConfig::load_from_assets(&asset_loader));
    create_app_state_with_config(asset_loader, config)
}

/// Create application state with an explicit configuration.
pub fn create_app_state_with_config(
    asset_loader: Arc<AssetLoader>,
    config: Arc<AppConfig>,
) -> anyhow::Result<AppState> {
    let renderer = Arc::new(
        RenderService::new(config.clone(), asset_loader.clone())
            .map_err(|e| anyhow::anyhow!("Failed to create render service: {e}"))?,
    );

    Ok(AppState {
        config,
        loader: asset_loader,
        renderer,
        frame_cache: Arc::new(FrameCache::new()),
    })
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    with_middleware(routes(state))
}

/// API endpoints without middleware, for merging extra routes before
/// [`with_middleware`] is applied.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/dashboard.png", get(handle_png))
        .route("/dashboard.raw", get(handle_raw))
        .route("/dashboard.svg", get(handle_svg))
        .route("/photos/:file", get(handle_photo))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .fallback(|| async { ApiError::NotFound })
        .with_state(state)
}

/// Wrap a router in request tracing and `Connection: close`.
///
/// Panel clients open one connection per request and never reuse it, so
/// every response closes the connection, including merged routes.
pub fn with_middleware(router: Router) -> Router {
    router
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            CONNECTION,
            axum::http::HeaderValue::from_static("close"),
        ))
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_png(State(state): State<AppState>) -> Result<Response, ApiError> {
    api::handle_png(State(state.renderer), State(state.frame_cache)).await
}

async fn handle_raw(State(state): State<AppState>) -> Result<Response, ApiError> {
    api::handle_raw(State(state.renderer), State(state.frame_cache)).await
}

async fn handle_svg(State(state): State<AppState>) -> Result<Response, ApiError> {
    api::handle_svg(State(state.renderer), State(state.frame_cache)).await
}

async fn handle_photo(
    State(state): State<AppState>,
    path: Path<String>,
) -> Result<Response, ApiError> {
    api::handle_photo(State(state.loader), path).await
}
