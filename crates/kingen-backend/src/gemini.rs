//! Gemini image generation client.
//!
//! Talks to the `generateContent` endpoint of the Gemini API with inline
//! base64 image parts and decodes the first inline image part of the response.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use kingen_core::{Config, FamilyOptions, GenerationOptions, UploadedImage};

use crate::traits::{BackendError, BackendOutput, GenerationBackend};

/// Gemini HTTP backend.
#[derive(Clone)]
pub struct GeminiBackend {
    http: reqwest::Client,
    api_base: String,
    model: String,
    api_key: String,
}

impl GeminiBackend {
    pub fn from_config(config: &Config) -> Result<Self, BackendError> {
        let api_key = config
            .gemini_api_key
            .clone()
            .ok_or_else(|| BackendError::Request("GEMINI_API_KEY is not set".to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.backend_timeout_secs))
            .build()
            .map_err(|e| BackendError::Request(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_base: config.gemini_api_base.trim_end_matches('/').to_string(),
            model: config.gemini_model.clone(),
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        )
    }

    async fn generate(
        &self,
        prompt: String,
        images: &[&UploadedImage],
    ) -> Result<BackendOutput, BackendError> {
        let mut parts = vec![Part::text(prompt)];
        for image in images {
            parts.push(Part::inline_image(
                &image.content_type,
                BASE64.encode(&image.data),
            ));
        }

        let request = GenerateContentRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE".to_string()],
            },
        };

        let start = std::time::Instant::now();

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: extract_api_error(&body),
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;

        let inline = body
            .first_inline_image()
            .ok_or(BackendError::NoImage)?;

        let data = BASE64
            .decode(inline.data.as_bytes())
            .map_err(|e| BackendError::Decode(format!("Invalid base64 image data: {}", e)))?;

        tracing::info!(
            model = %self.model,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Generation call successful"
        );

        let metadata = serde_json::json!({
            "model": self.model,
            "mimeType": inline.mime_type,
            "generatedAt": Utc::now().to_rfc3339(),
        });

        Ok(BackendOutput { data, metadata })
    }
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    async fn generate_portrait(
        &self,
        image: &UploadedImage,
        options: &GenerationOptions,
    ) -> Result<BackendOutput, BackendError> {
        self.generate(portrait_prompt(options), &[image]).await
    }

    async fn generate_family(
        &self,
        parent1: &UploadedImage,
        parent2: &UploadedImage,
        options: &FamilyOptions,
    ) -> Result<BackendOutput, BackendError> {
        self.generate(family_prompt(options), &[parent1, parent2])
            .await
    }
}

fn quality_clause(quality: i64, format: &str, enhance: bool) -> String {
    let mut clause = format!(
        "Render the output as a single high-resolution {} image at quality level {}.",
        format, quality
    );
    if enhance {
        clause.push_str(
            " Enhance sharpness, lighting and skin texture for a professional photographic look.",
        );
    }
    clause
}

fn portrait_prompt(options: &GenerationOptions) -> String {
    format!(
        "Transform the person in this portrait into a realistic young child version \
         of themselves, keeping the same identity, facial features, skin tone and hair \
         color. Keep the framing and background natural. \
         Target dimensions: at most {}x{} pixels. {}",
        options.max_width,
        options.max_height,
        quality_clause(options.quality, &options.format, options.enhance_quality)
    )
}

fn family_prompt(options: &FamilyOptions) -> String {
    let ages = options
        .child_ages()
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Create a realistic family portrait combining the two people in these photos \
         as the parents, together with {} child(ren) aged {} years. Each child should \
         plausibly blend both parents' facial features, skin tone and hair color. \
         Arrange everyone in a warm, natural group composition. {}",
        options.number_of_children,
        ages,
        quality_clause(options.quality, &options.format, options.enhance_quality)
    )
}

/// Pull the human-readable message out of a Gemini error body, falling back to
/// the raw body (truncated) when it does not match the expected shape.
fn extract_api_error(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: Option<ErrorDetail>,
    }
    #[derive(Deserialize)]
    struct ErrorDetail {
        message: Option<String>,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .and_then(|e| e.message)
        .unwrap_or_else(|| body.chars().take(200).collect())
}

// ----- Wire types -----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: String) -> Self {
        Self {
            text: Some(text),
            inline_data: None,
        }
    }

    fn inline_image(mime_type: &str, data: String) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.to_string(),
                data,
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(rename = "inlineData")]
    inline_data: Option<InlineData>,
}

impl GenerateContentResponse {
    fn first_inline_image(self) -> Option<InlineData> {
        self.candidates?
            .into_iter()
            .filter_map(|c| c.content)
            .filter_map(|c| c.parts)
            .flatten()
            .find_map(|p| p.inline_data)
    }
}
