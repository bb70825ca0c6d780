//! Liveness and discovery endpoints.
//!
//! All bodies here are static apart from the health uptime; none of them
//! touch storage or the backend.

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::state::AppState;

/// Welcome banner at the root path.
#[utoipa::path(
    get,
    path = "/",
    tag = "status",
    responses((status = 200, description = "Service banner"))
)]
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Young Parent API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
    }))
}

/// Liveness probe with process uptime.
#[utoipa::path(
    get,
    path = "/health",
    tag = "status",
    responses((status = 200, description = "Service is healthy"))
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339(),
        "uptime": state.started_at.elapsed().as_secs_f64(),
    }))
}

/// Top-level API discovery document.
#[utoipa::path(
    get,
    path = "/api/info",
    tag = "status",
    responses((status = 200, description = "API endpoint listing"))
)]
pub async fn api_info() -> Json<Value> {
    Json(json!({
        "message": "Young Parent API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "imageGeneration": "/api/generate-image",
            "familyGeneration": "/api/generate-family",
            "health": "/health",
        },
    }))
}

/// Static capability document for the single-image pipeline.
#[utoipa::path(
    get,
    path = "/api/generate-image/status",
    tag = "images",
    responses((status = 200, description = "Image generation service status"))
)]
pub async fn generate_image_status(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "Image generation service is running",
        "model": state.config.gemini_model,
        "endpoints": {
            "generate": "POST /api/generate-image",
            "download": "GET /api/images/download/{filename}",
            "info": "GET /api/images/info/{filename}",
        },
        "supportedFormats": ["JPEG", "PNG", "WebP"],
        "qualityOptions": {
            "maxWidth": "Maximum width in pixels (default: 2048)",
            "maxHeight": "Maximum height in pixels (default: 2048)",
            "quality": "JPEG quality 1-100 (default: 95)",
            "format": "Output format: jpeg, png, webp (default: jpeg)",
            "enhanceQuality": "Enable quality enhancement (default: true)",
        },
        "usage": {
            "queryParams": "Add quality options as query parameters: ?quality=98&maxWidth=4096",
            "formData": "Add quality options in form data alongside the image file",
        },
    }))
}

/// Static capability document for the family pipeline.
#[utoipa::path(
    get,
    path = "/api/generate-family/status",
    tag = "family",
    responses((status = 200, description = "Family generation service status"))
)]
pub async fn generate_family_status(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "Family generation service is running",
        "model": state.config.gemini_model,
        "requiredImages": 2,
        "endpoints": {
            "generate": "POST /api/generate-family",
            "download": "GET /api/family/download/{filename}",
            "info": "GET /api/family/info/{filename}",
        },
        "supportedFormats": ["JPEG", "PNG", "WebP"],
        "familyOptions": {
            "numberOfChildren": "Number of children to generate (1-6, default: 2)",
            "ageGap": "Age gap between children in years (1-5, default: 2)",
            "youngestAge": "Age of youngest child (1-12, default: 4)",
            "quality": "JPEG quality 1-100 (default: 95)",
            "format": "Output format: jpeg, png, webp (default: jpeg)",
            "enhanceQuality": "Enable quality enhancement (default: true)",
        },
        "usage": {
            "queryParams": "Add family options as query parameters: ?numberOfChildren=3&ageGap=3&youngestAge=5",
            "formData": "Add family options in form data alongside the parent images",
            "uploadFields": "Use field names \"parent1\" and \"parent2\" or upload any 2 images",
        },
    }))
}
