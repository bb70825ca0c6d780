use std::sync::Arc;

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use kingen_core::models::FieldMap;
use kingen_core::{validation, FamilyOptions, FamilySpecs};

use crate::error::{ErrorResponse, HttpAppError};
use crate::intake::RequestParts;
use crate::services::GenerationService;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateFamilyData {
    pub parent1_filename: String,
    pub parent2_filename: String,
    pub generated_filename: String,
    pub download_url: String,
    pub family_specs: FamilySpecs,
    /// Free-form metadata reported by the generation backend.
    #[schema(value_type = Object)]
    pub metadata: serde_json::Value,
    /// The fully-resolved options the request ran with.
    pub quality_settings: FamilyOptions,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateFamilyResponse {
    pub success: bool,
    pub message: String,
    pub data: GenerateFamilyData,
}

/// Generate-family handler
///
/// Accepts two parent portraits as multipart form data (fields "parent1" and
/// "parent2", or any two files), resolves family options from body fields and
/// query parameters, validates the family composition constraints, and
/// delegates to the generation backend.
#[utoipa::path(
    post,
    path = "/api/generate-family",
    tag = "family",
    params(
        ("numberOfChildren" = Option<i64>, Query, description = "Number of children to generate (1-6, default: 2)"),
        ("ageGap" = Option<i64>, Query, description = "Age gap between children in years (1-5, default: 2)"),
        ("youngestAge" = Option<i64>, Query, description = "Age of youngest child (1-12, default: 4)"),
        ("quality" = Option<i64>, Query, description = "JPEG quality 1-100 (default: 95)"),
        ("format" = Option<String>, Query, description = "Output format: jpeg, png, webp (default: jpeg)"),
        ("enhanceQuality" = Option<String>, Query, description = "Enable quality enhancement (default: true)")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Family picture generated successfully", body = GenerateFamilyResponse),
        (status = 400, description = "Missing images or invalid family options", body = ErrorResponse),
        (status = 500, description = "Generation or storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "generate_family"))]
pub async fn generate_family(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FieldMap>,
    multipart: Multipart,
) -> Result<Json<GenerateFamilyResponse>, HttpAppError> {
    let parts = RequestParts::read(multipart, 2).await?;
    let (parent1, parent2, body) = parts.parent_images()?;

    let options = FamilyOptions::resolve(&body, &query);
    tracing::debug!(?options, "Resolved family options");

    validation::validate_family_request(&parent1, &parent2, &options)?;

    let result = GenerationService::new(&state)
        .generate_family(parent1, parent2, &options)
        .await?;

    let mut sources = result.source_filenames.into_iter();
    let parent1_filename = sources.next().unwrap_or_default();
    let parent2_filename = sources.next().unwrap_or_default();

    // The orchestrator always populates family specs in family mode.
    let family_specs = result
        .family_specs
        .unwrap_or_else(|| FamilySpecs::from(&options));

    Ok(Json(GenerateFamilyResponse {
        success: true,
        message: "Family picture generated successfully".to_string(),
        data: GenerateFamilyData {
            parent1_filename,
            parent2_filename,
            generated_filename: result.generated_filename,
            download_url: result.download_url,
            family_specs,
            metadata: result.metadata,
            quality_settings: options,
        },
    }))
}
