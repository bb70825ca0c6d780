use async_trait::async_trait;
use thiserror::Error;

use kingen_core::{FamilyOptions, GenerationOptions, UploadedImage};

/// Backend call failures.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Generation request failed: {0}")]
    Request(String),

    #[error("Generation backend returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Generation backend returned no image data")]
    NoImage,

    #[error("Failed to decode backend response: {0}")]
    Decode(String),
}

/// Raw output of a generation call: image bytes plus free-form metadata that
/// is passed through to the caller untouched.
#[derive(Debug, Clone)]
pub struct BackendOutput {
    pub data: Vec<u8>,
    pub metadata: serde_json::Value,
}

/// External generative-image service.
///
/// One async call per generation taking validated image payload(s) and
/// resolved options; implementations perform no retries.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate a stylized portrait from a single source image.
    async fn generate_portrait(
        &self,
        image: &UploadedImage,
        options: &GenerationOptions,
    ) -> Result<BackendOutput, BackendError>;

    /// Generate a composed family picture from two parent images.
    async fn generate_family(
        &self,
        parent1: &UploadedImage,
        parent2: &UploadedImage,
        options: &FamilyOptions,
    ) -> Result<BackendOutput, BackendError>;
}
