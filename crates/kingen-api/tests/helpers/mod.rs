//! Test helpers: build AppState and router with a scripted backend.
//!
//! Run from workspace root: `cargo test -p kingen-api --test generate_image_test`
//! or `cargo test -p kingen-api`.

// Each test binary compiles this module separately and uses a different subset.
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::json;
use tempfile::TempDir;

use kingen_api::setup::routes;
use kingen_api::state::AppState;
use kingen_backend::{BackendError, BackendOutput, GenerationBackend};
use kingen_core::{Config, FamilyOptions, GenerationOptions, UploadedImage};
use kingen_storage::LocalArtifactStore;

/// Bytes the scripted backend returns as the "generated" image.
pub const GENERATED_BYTES: &[u8] = b"generated-image-bytes";

/// Backend double that either returns fixed bytes or a scripted failure.
pub struct ScriptedBackend {
    failure: Option<BackendError>,
}

#[async_trait]
impl GenerationBackend for ScriptedBackend {
    async fn generate_portrait(
        &self,
        _image: &UploadedImage,
        _options: &GenerationOptions,
    ) -> Result<BackendOutput, BackendError> {
        self.output()
    }

    async fn generate_family(
        &self,
        _parent1: &UploadedImage,
        _parent2: &UploadedImage,
        _options: &FamilyOptions,
    ) -> Result<BackendOutput, BackendError> {
        self.output()
    }
}

impl ScriptedBackend {
    fn output(&self) -> Result<BackendOutput, BackendError> {
        match &self.failure {
            Some(BackendError::Api { status, message }) => Err(BackendError::Api {
                status: *status,
                message: message.clone(),
            }),
            Some(BackendError::NoImage) => Err(BackendError::NoImage),
            Some(BackendError::Request(msg)) => Err(BackendError::Request(msg.clone())),
            Some(BackendError::Decode(msg)) => Err(BackendError::Decode(msg.clone())),
            None => Ok(BackendOutput {
                data: GENERATED_BYTES.to_vec(),
                metadata: json!({ "model": "scripted", "mimeType": "image/jpeg" }),
            }),
        }
    }
}

/// Test application: server, state, and the temp upload directory.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

fn test_config(upload_path: &str) -> Config {
    Config {
        server_port: 2004,
        environment: "test".to_string(),
        cors_origins: vec!["http://localhost:3000".to_string()],
        upload_path: upload_path.to_string(),
        max_upload_bytes: 25 * 1024 * 1024,
        gemini_api_key: Some("test-key".to_string()),
        gemini_api_base: "http://localhost:1".to_string(),
        gemini_model: "test-model".to_string(),
        backend_timeout_secs: 5,
        keep_alive_url: None,
        keep_alive_interval_secs: 840,
    }
}

async fn setup_with_backend(failure: Option<BackendError>) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let upload_path = temp_dir.path().to_str().expect("utf-8 path").to_string();

    let config = test_config(&upload_path);

    let store = LocalArtifactStore::new(&upload_path)
        .await
        .expect("Failed to create local artifact store");
    let backend = ScriptedBackend { failure };

    let state = Arc::new(AppState::new(
        config.clone(),
        Arc::new(store),
        Arc::new(backend),
    ));

    let router = routes::setup_routes(&config, state.clone()).expect("Failed to build router");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        state,
        _temp_dir: temp_dir,
    }
}

/// Setup test app with a backend that always succeeds.
pub async fn setup_test_app() -> TestApp {
    setup_with_backend(None).await
}

/// Setup test app with a backend that fails with the given API message.
pub async fn setup_failing_app(message: &str) -> TestApp {
    setup_with_backend(Some(BackendError::Api {
        status: 503,
        message: message.to_string(),
    }))
    .await
}

/// A minimal JPEG-typed multipart file part.
pub fn jpeg_part(filename: &str) -> axum_test::multipart::Part {
    axum_test::multipart::Part::bytes(b"\xFF\xD8\xFF\xE0 fake jpeg".to_vec())
        .file_name(filename.to_string())
        .mime_type("image/jpeg")
}
