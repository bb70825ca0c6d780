//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use kingen_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Young Parent API",
        version = "1.0.0",
        description = "Portrait transformation and family picture generation API. Uploads are delegated to a generative image backend; generated artifacts are stored locally and served by filename."
    ),
    paths(
        // Single-image pipeline
        handlers::generate_image::generate_image,
        handlers::status::generate_image_status,
        handlers::artifact_download::download_image,
        handlers::artifact_info::image_info,
        // Family pipeline
        handlers::generate_family::generate_family,
        handlers::status::generate_family_status,
        handlers::artifact_download::download_family_image,
        handlers::artifact_info::family_image_info,
        // Service status
        handlers::status::root,
        handlers::status::health,
        handlers::status::api_info,
    ),
    components(schemas(
        error::ErrorResponse,
        models::GenerationOptions,
        models::FamilyOptions,
        models::FamilySpecs,
        handlers::generate_image::GenerateImageResponse,
        handlers::generate_image::GenerateImageData,
        handlers::generate_family::GenerateFamilyResponse,
        handlers::generate_family::GenerateFamilyData,
        handlers::artifact_info::ArtifactInfoResponse,
        handlers::artifact_info::ArtifactInfoData,
    )),
    tags(
        (name = "images", description = "Single-image generation and retrieval"),
        (name = "family", description = "Family picture generation and retrieval"),
        (name = "status", description = "Liveness and discovery")
    )
)]
pub struct ApiDoc;
