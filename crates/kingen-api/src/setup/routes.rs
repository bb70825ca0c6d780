//! Route configuration and setup

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, StatusCode, Uri},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use kingen_core::Config;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::state::AppState;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;

    let api_routes = Router::new()
        .route(
            "/generate-image",
            post(handlers::generate_image::generate_image),
        )
        .route(
            "/generate-image/status",
            get(handlers::status::generate_image_status),
        )
        .route(
            "/images/download/{filename}",
            get(handlers::artifact_download::download_image),
        )
        .route(
            "/images/info/{filename}",
            get(handlers::artifact_info::image_info),
        )
        .route(
            "/generate-family",
            post(handlers::generate_family::generate_family),
        )
        .route(
            "/generate-family/status",
            get(handlers::status::generate_family_status),
        )
        .route(
            "/family/download/{filename}",
            get(handlers::artifact_download::download_family_image),
        )
        .route(
            "/family/info/{filename}",
            get(handlers::artifact_info::family_image_info),
        )
        .route("/info", get(handlers::status::api_info))
        .route("/openapi.json", get(openapi_spec));

    let app = Router::new()
        .route("/", get(handlers::status::root))
        .route("/health", get(handlers::status::health))
        .nest("/api", api_routes)
        .with_state(state)
        .merge(Router::from(
            utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"),
        ))
        .fallback(route_not_found)
        // Multipart bodies are capped by the request body limit layer alone
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_upload_bytes()))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

/// Serve the OpenAPI document consumed by the /docs UI.
async fn openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn route_not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Route not found",
            "path": uri.path(),
        })),
    )
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin {:?}: {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_origins(origins: &[&str]) -> Config {
        Config {
            server_port: 2004,
            environment: "test".to_string(),
            cors_origins: origins.iter().map(|o| o.to_string()).collect(),
            upload_path: "./uploads".to_string(),
            max_upload_bytes: 25 * 1024 * 1024,
            gemini_api_key: Some("test-key".to_string()),
            gemini_api_base: "http://localhost:1".to_string(),
            gemini_model: "test-model".to_string(),
            backend_timeout_secs: 5,
            keep_alive_url: None,
            keep_alive_interval_secs: 840,
        }
    }

    #[test]
    fn test_cors_accepts_origin_list_and_wildcard() {
        let config = config_with_origins(&["http://localhost:3000", "https://example.com"]);
        assert!(setup_cors(&config).is_ok());

        let config = config_with_origins(&["*"]);
        assert!(setup_cors(&config).is_ok());
    }

    #[test]
    fn test_cors_rejects_unparseable_origin() {
        // A single bad entry must fail startup, not silently empty the allowlist.
        let config = config_with_origins(&["http://localhost:3000", "bad\norigin"]);
        let err = setup_cors(&config).unwrap_err();
        assert!(err.to_string().contains("Invalid CORS origin"), "{}", err);
    }
}
