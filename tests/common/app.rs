//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use inkdash::assets::AssetLoader;
use inkdash::models::AppConfig;
use inkdash::server::{build_router, create_app_state_with_config, AppState};
use inkdash::services::FrameCache;

use super::fixtures;

/// Test application with router and direct access to services
pub struct TestApp {
    router: axum::Router,
    pub frame_cache: Arc<FrameCache>,
    assets: TempDir,
}

impl TestApp {
    /// Create a test application over a temporary assets directory holding
    /// the default fixture events
    pub fn new() -> Self {
        Self::with_config(AppConfig::default(), &fixtures::default_events())
    }

    /// Create a test application with a given config and events file content
    pub fn with_config(config: AppConfig, events_json: &str) -> Self {
        let assets = tempfile::tempdir().expect("Failed to create assets dir");
        std::fs::write(assets.path().join("events.json"), events_json)
            .expect("Failed to write events");

        let state = Self::create_state(assets.path(), config);
        let frame_cache = state.frame_cache.clone();

        // Build router using shared server module (same as production)
        let router = build_router(state);

        Self {
            router,
            frame_cache,
            assets,
        }
    }

    /// Create application state over an assets directory
    pub fn create_state(assets_dir: &Path, config: AppConfig) -> AppState {
        let asset_loader = Arc::new(AssetLoader::new(assets_dir, None));
        create_app_state_with_config(asset_loader, Arc::new(config))
            .expect("Failed to create app state")
    }

    /// The temporary assets directory
    pub fn assets_dir(&self) -> &Path {
        self.assets.path()
    }

    /// Write a file into the assets directory
    pub fn write_asset(&self, name: &str, data: &[u8]) {
        std::fs::write(self.assets.path().join(name), data).expect("Failed to write asset");
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a request with an arbitrary method
    pub async fn request_method(&self, method: &str, path: &str) -> TestResponse {
        self.request(
            Request::builder()
                .method(method)
                .uri(path)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Get raw body bytes
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Get a header value as string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Check if response is a PNG image
    pub fn is_png(&self) -> bool {
        self.body.len() >= 8 && &self.body[0..8] == b"\x89PNG\r\n\x1a\n"
    }
}
