use std::sync::Arc;

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use kingen_core::models::FieldMap;
use kingen_core::{validation, GenerationOptions};

use crate::error::{ErrorResponse, HttpAppError};
use crate::intake::RequestParts;
use crate::services::GenerationService;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageData {
    pub original_filename: String,
    pub generated_filename: String,
    pub download_url: String,
    /// Free-form metadata reported by the generation backend.
    #[schema(value_type = Object)]
    pub metadata: serde_json::Value,
    /// The fully-resolved options the request ran with.
    pub quality_settings: GenerationOptions,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateImageResponse {
    pub success: bool,
    pub message: String,
    pub data: GenerateImageData,
}

/// Generate-image handler
///
/// Accepts one uploaded portrait as multipart form data (field "image" or
/// "file"), resolves quality options from body fields and query parameters,
/// delegates to the generation backend, and stores the result for later
/// download.
#[utoipa::path(
    post,
    path = "/api/generate-image",
    tag = "images",
    params(
        ("maxWidth" = Option<i64>, Query, description = "Maximum width in pixels (default: 2048)"),
        ("maxHeight" = Option<i64>, Query, description = "Maximum height in pixels (default: 2048)"),
        ("quality" = Option<i64>, Query, description = "JPEG quality 1-100 (default: 95)"),
        ("format" = Option<String>, Query, description = "Output format: jpeg, png, webp (default: jpeg)"),
        ("enhanceQuality" = Option<String>, Query, description = "Enable quality enhancement (default: true)")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image transformed successfully", body = GenerateImageResponse),
        (status = 400, description = "Missing or invalid image file", body = ErrorResponse),
        (status = 500, description = "Generation or storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "generate_image"))]
pub async fn generate_image(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FieldMap>,
    multipart: Multipart,
) -> Result<Json<GenerateImageResponse>, HttpAppError> {
    let parts = RequestParts::read(multipart, 1).await?;
    let (image, body) = parts.single_image()?;

    validation::validate_single_image(&image)?;

    let options = GenerationOptions::resolve(&body, &query);
    tracing::debug!(?options, "Resolved quality options");

    let result = GenerationService::new(&state)
        .generate_portrait(image, &options)
        .await?;

    let original_filename = result
        .source_filenames
        .into_iter()
        .next()
        .unwrap_or_default();

    Ok(Json(GenerateImageResponse {
        success: true,
        message: "Image transformed successfully".to_string(),
        data: GenerateImageData {
            original_filename,
            generated_filename: result.generated_filename,
            download_url: result.download_url,
            metadata: result.metadata,
            quality_settings: options,
        },
    }))
}
