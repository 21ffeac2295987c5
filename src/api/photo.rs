use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::assets::AssetLoader;
use crate::error::ApiError;

/// Whether a requested file name may be served as a photo: ASCII word
/// characters (`[A-Za-z0-9_]`) followed by `.jpg`
pub fn is_photo_name(name: &str) -> bool {
    name.strip_suffix(".jpg").is_some_and(|stem| {
        !stem.is_empty() && stem.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    })
}

/// Get a JPEG photo from the assets directory
#[utoipa::path(
    get,
    path = "/photos/{file}",
    responses(
        (status = 200, description = "JPEG photo", content_type = "image/jpeg"),
        (status = 404, description = "No such photo"),
    ),
    params(
        ("file" = String, Path, description = "Photo file name, word characters followed by .jpg"),
    ),
    tag = "Photos"
)]
pub async fn handle_photo(
    State(loader): State<Arc<AssetLoader>>,
    Path(file): Path<String>,
) -> Result<Response, ApiError> {
    if !is_photo_name(&file) {
        tracing::debug!(file = %file, "Rejected photo name");
        return Err(ApiError::NotFound);
    }

    let data = match loader.read_asset(std::path::Path::new(&file)).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(ApiError::NotFound),
        Err(e) => return Err(ApiError::Internal(e.to_string())),
    };

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/jpeg".to_string()),
            (header::CONTENT_LENGTH, data.len().to_string()),
        ],
        Bytes::from(data),
    )
        .into_response())
}
