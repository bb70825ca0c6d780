use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use kingen_core::{AppError, GenerationMode};
use kingen_storage::StorageError;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct ArtifactInfoData {
    pub filename: String,
    pub size: u64,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(rename = "downloadUrl")]
    pub download_url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ArtifactInfoResponse {
    pub success: bool,
    pub data: ArtifactInfoData,
}

async fn artifact_info(
    state: &AppState,
    mode: GenerationMode,
    filename: String,
    not_found_message: &str,
) -> Result<Json<ArtifactInfoResponse>, HttpAppError> {
    let info = state.store.info(&filename).await.map_err(|e| match e {
        StorageError::NotFound(_) | StorageError::InvalidFilename(_) => {
            AppError::NotFound(not_found_message.to_string())
        }
        other => AppError::Internal(format!("Failed to stat stored image: {}", other)),
    })?;

    Ok(Json(ArtifactInfoResponse {
        success: true,
        data: ArtifactInfoData {
            download_url: mode.download_url(&filename),
            filename,
            size: info.size,
            created: info.created,
            modified: info.modified,
        },
    }))
}

/// Size and timestamps of a generated image.
#[utoipa::path(
    get,
    path = "/api/images/info/{filename}",
    tag = "images",
    params(
        ("filename" = String, Path, description = "Generated image filename")
    ),
    responses(
        (status = 200, description = "Image metadata", body = ArtifactInfoResponse),
        (status = 404, description = "File not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "image_info"))]
pub async fn image_info(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Json<ArtifactInfoResponse>, HttpAppError> {
    artifact_info(
        &state,
        GenerationMode::Portrait,
        filename,
        "The requested image file does not exist",
    )
    .await
}

/// Size and timestamps of a generated family picture.
#[utoipa::path(
    get,
    path = "/api/family/info/{filename}",
    tag = "family",
    params(
        ("filename" = String, Path, description = "Generated family picture filename")
    ),
    responses(
        (status = 200, description = "Family picture metadata", body = ArtifactInfoResponse),
        (status = 404, description = "File not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "family_image_info"))]
pub async fn family_image_info(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Json<ArtifactInfoResponse>, HttpAppError> {
    artifact_info(
        &state,
        GenerationMode::Family,
        filename,
        "The requested family image file does not exist",
    )
    .await
}
