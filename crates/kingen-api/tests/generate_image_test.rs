//! Single-image generation API integration tests.
//!
//! Run with: `cargo test -p kingen-api --test generate_image_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::{jpeg_part, setup_failing_app, setup_test_app, GENERATED_BYTES};

#[tokio::test]
async fn test_generate_image_success() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_part("image", jpeg_part("portrait.jpg"));
    let response = app.client().post("/api/generate-image").multipart(form).await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Image transformed successfully");

    let data = &body["data"];
    assert_eq!(data["originalFilename"], "portrait.jpg");

    let generated = data["generatedFilename"].as_str().unwrap();
    assert!(generated.starts_with("generated-"), "{}", generated);
    assert!(generated.ends_with(".jpeg"), "{}", generated);
    assert_eq!(
        data["downloadUrl"],
        format!("/api/images/download/{}", generated)
    );
    assert_eq!(data["metadata"]["model"], "scripted");
}

#[tokio::test]
async fn test_generate_image_default_quality_settings() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_part("image", jpeg_part("portrait.jpg"));
    let response = app.client().post("/api/generate-image").multipart(form).await;

    let body: serde_json::Value = response.json();
    let settings = &body["data"]["qualitySettings"];
    assert_eq!(settings["maxWidth"], 2048);
    assert_eq!(settings["maxHeight"], 2048);
    assert_eq!(settings["quality"], 95);
    assert_eq!(settings["format"], "jpeg");
    assert_eq!(settings["enhanceQuality"], true);
}

#[tokio::test]
async fn test_generate_image_body_fields_win_over_query() {
    let app = setup_test_app().await;

    let form = MultipartForm::new()
        .add_part("image", jpeg_part("portrait.jpg"))
        .add_text("quality", "80");
    let response = app
        .client()
        .post("/api/generate-image")
        .add_query_param("quality", "60")
        .add_query_param("maxWidth", "1024")
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    let settings = &body["data"]["qualitySettings"];
    assert_eq!(settings["quality"], 80);
    assert_eq!(settings["maxWidth"], 1024);
}

#[tokio::test]
async fn test_generate_image_accepts_file_field_name() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_part("file", jpeg_part("alt.jpg"));
    let response = app.client().post("/api/generate-image").multipart(form).await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"]["originalFilename"], "alt.jpg");
}

#[tokio::test]
async fn test_generate_image_without_file() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_text("quality", "80");
    let response = app.client().post("/api/generate-image").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "No image file provided");
    assert_eq!(
        body["message"],
        "Please upload an image file. Use field name \"image\" or \"file\""
    );
}

#[tokio::test]
async fn test_generate_image_rejects_wrong_content_type() {
    let app = setup_test_app().await;

    let part = Part::bytes(b"not an image".to_vec())
        .file_name("notes.txt")
        .mime_type("text/plain");
    let form = MultipartForm::new().add_part("image", part);
    let response = app.client().post("/api/generate-image").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Invalid image file");
    assert_eq!(
        body["message"],
        "Invalid file type. Only JPEG, PNG, and WebP images are allowed"
    );
}

#[tokio::test]
async fn test_generate_image_rejects_empty_file() {
    let app = setup_test_app().await;

    let part = Part::bytes(Vec::new())
        .file_name("empty.jpg")
        .mime_type("image/jpeg");
    let form = MultipartForm::new().add_part("image", part);
    let response = app.client().post("/api/generate-image").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Uploaded file is empty");
}

#[tokio::test]
async fn test_generate_image_backend_failure() {
    let app = setup_failing_app("Resource has been exhausted").await;

    let form = MultipartForm::new().add_part("image", jpeg_part("portrait.jpg"));
    let response = app.client().post("/api/generate-image").multipart(form).await;

    assert_eq!(response.status_code(), 500);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Image generation failed");
    assert_eq!(body["message"], "Resource has been exhausted");
}

#[tokio::test]
async fn test_generated_image_is_downloadable() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_part("image", jpeg_part("portrait.jpg"));
    let response = app.client().post("/api/generate-image").multipart(form).await;
    let body: serde_json::Value = response.json();
    let url = body["data"]["downloadUrl"].as_str().unwrap().to_string();

    let download = app.client().get(&url).await;
    assert_eq!(download.status_code(), 200);
    assert_eq!(
        download.headers().get("content-type").unwrap(),
        "image/jpeg"
    );
    assert_eq!(download.as_bytes().as_ref(), GENERATED_BYTES);
}

#[tokio::test]
async fn test_generate_image_status_endpoint() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/generate-image/status").await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Image generation service is running");
    assert_eq!(body["model"], "test-model");
}
