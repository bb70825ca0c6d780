use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, Response, StatusCode},
    response::IntoResponse,
};
use futures::StreamExt;

use kingen_core::AppError;
use kingen_storage::StorageError;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Stream an artifact from the store with attachment headers.
///
/// The content type is always `image/jpeg` regardless of the stored format;
/// the store keeps no format metadata.
async fn stream_artifact(
    state: &AppState,
    filename: &str,
    not_found_message: &str,
) -> Result<Response<Body>, HttpAppError> {
    let stream = state.store.open(filename).await.map_err(|e| match e {
        StorageError::NotFound(_) | StorageError::InvalidFilename(_) => {
            AppError::NotFound(not_found_message.to_string())
        }
        other => AppError::Internal(format!("Failed to open stored image: {}", other)),
    })?;

    // Wrap storage stream for axum Body
    let body_stream = stream.map(|result| {
        result.map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)))
    });

    let content_disposition = format!("attachment; filename=\"{}\"", filename);

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "image/jpeg")
        .header(header::CONTENT_DISPOSITION, content_disposition.as_str())
        .body(Body::from_stream(body_stream))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}

/// Download a generated image.
#[utoipa::path(
    get,
    path = "/api/images/download/{filename}",
    tag = "images",
    params(
        ("filename" = String, Path, description = "Generated image filename")
    ),
    responses(
        (status = 200, description = "Image file", content_type = "image/jpeg"),
        (status = 404, description = "File not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "download_image"))]
pub async fn download_image(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    stream_artifact(&state, &filename, "The requested image file does not exist").await
}

/// Download a generated family picture.
#[utoipa::path(
    get,
    path = "/api/family/download/{filename}",
    tag = "family",
    params(
        ("filename" = String, Path, description = "Generated family picture filename")
    ),
    responses(
        (status = 200, description = "Family picture file", content_type = "image/jpeg"),
        (status = 404, description = "File not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "download_family_image"))]
pub async fn download_family_image(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    stream_artifact(
        &state,
        &filename,
        "The requested family image file does not exist",
    )
    .await
}
