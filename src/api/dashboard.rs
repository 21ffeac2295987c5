use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::error::ApiError;
use crate::services::{FrameCache, RenderService, RenderedFrame};

/// Return the cached frame if fresh, otherwise render a new one
pub async fn current_frame(
    renderer: &RenderService,
    cache: &FrameCache,
) -> Result<Arc<RenderedFrame>, ApiError> {
    let now = chrono::Utc::now();
    let max_age = renderer.config().cache_max_age();

    if let Some(frame) = cache.get_fresh(now, max_age).await {
        tracing::debug!(generated_at = %frame.generated_at, "Serving cached frame");
        return Ok(frame);
    }

    let frame = Arc::new(renderer.render_frame(now).await?);
    if max_age > chrono::Duration::zero() {
        cache.store(frame.clone()).await;
    }
    Ok(frame)
}

fn binary_response(content_type: &'static str, body: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_LENGTH, body.len().to_string()),
        ],
        Bytes::from(body),
    )
        .into_response()
}

/// Get the dithered dashboard as a PNG
///
/// The image is the 8-bit mask of the frame: every pixel is 0 or 255.
#[utoipa::path(
    get,
    path = "/dashboard.png",
    responses(
        (status = 200, description = "Dithered dashboard", content_type = "image/png"),
        (status = 500, description = "Rendering error"),
    ),
    tag = "Dashboard"
)]
pub async fn handle_png(
    State(renderer): State<Arc<RenderService>>,
    State(cache): State<Arc<FrameCache>>,
) -> Result<Response, ApiError> {
    let frame = current_frame(&renderer, &cache).await?;
    tracing::info!(size_bytes = frame.png_bytes.len(), "Serving dashboard PNG");
    Ok(binary_response("image/png", frame.png_bytes.clone()))
}

/// Get the dashboard as a packed 1-bit bitmap
///
/// Rows top to bottom, 8 pixels per byte, most significant bit first;
/// a set bit means the pixel is on.
#[utoipa::path(
    get,
    path = "/dashboard.raw",
    responses(
        (status = 200, description = "Packed bitmap, (width / 8) * height bytes", content_type = "application/octet-stream"),
        (status = 500, description = "Rendering error"),
    ),
    tag = "Dashboard"
)]
pub async fn handle_raw(
    State(renderer): State<Arc<RenderService>>,
    State(cache): State<Arc<FrameCache>>,
) -> Result<Response, ApiError> {
    let frame = current_frame(&renderer, &cache).await?;
    tracing::info!(size_bytes = frame.packed.len(), "Serving packed bitmap");
    Ok(binary_response("application/octet-stream", frame.packed.clone()))
}

/// Get the dashboard SVG before rasterization
#[utoipa::path(
    get,
    path = "/dashboard.svg",
    responses(
        (status = 200, description = "Dashboard markup", content_type = "image/svg+xml"),
        (status = 500, description = "Rendering error"),
    ),
    tag = "Dashboard"
)]
pub async fn handle_svg(
    State(renderer): State<Arc<RenderService>>,
    State(cache): State<Arc<FrameCache>>,
) -> Result<Response, ApiError> {
    let frame = current_frame(&renderer, &cache).await?;
    Ok(binary_response("image/svg+xml", frame.svg.clone().into_bytes()))
}
