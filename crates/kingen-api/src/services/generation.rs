//! Generation orchestration.
//!
//! Sequences one generation request end to end: delegate to the configured
//! backend, persist the returned artifact under an orchestrator-assigned
//! filename, and assemble the result for the handler. The service itself is
//! stateless; everything it needs lives in [`AppState`].

use std::sync::Arc;

use kingen_backend::BackendError;
use kingen_core::{AppError, FamilyOptions, FamilySpecs, GenerationMode, GenerationOptions, GenerationResult, UploadedImage};
use uuid::Uuid;

use crate::state::AppState;

pub struct GenerationService {
    state: Arc<AppState>,
}

impl GenerationService {
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            state: state.clone(),
        }
    }

    /// Transform a single portrait through the backend and persist the result.
    pub async fn generate_portrait(
        &self,
        image: UploadedImage,
        options: &GenerationOptions,
    ) -> Result<GenerationResult, AppError> {
        tracing::info!(
            filename = %image.original_filename,
            size = image.len(),
            "Starting image generation"
        );

        let output = self
            .state
            .backend
            .generate_portrait(&image, options)
            .await
            .map_err(|e| backend_error(GenerationMode::Portrait, e))?;

        let filename = self
            .persist(GenerationMode::Portrait, output.data, &options.format)
            .await?;

        tracing::info!(generated = %filename, "Image generation complete");

        Ok(GenerationResult {
            source_filenames: vec![image.original_filename],
            download_url: GenerationMode::Portrait.download_url(&filename),
            generated_filename: filename,
            metadata: output.metadata,
            family_specs: None,
        })
    }

    /// Generate a family picture from two parent portraits and persist it.
    ///
    /// Options are assumed validated; the backend receives them as-is.
    pub async fn generate_family(
        &self,
        parent1: UploadedImage,
        parent2: UploadedImage,
        options: &FamilyOptions,
    ) -> Result<GenerationResult, AppError> {
        tracing::info!(
            parent1 = %parent1.original_filename,
            parent2 = %parent2.original_filename,
            children = options.number_of_children,
            "Starting family generation"
        );

        let output = self
            .state
            .backend
            .generate_family(&parent1, &parent2, options)
            .await
            .map_err(|e| backend_error(GenerationMode::Family, e))?;

        let filename = self
            .persist(GenerationMode::Family, output.data, &options.format)
            .await?;

        tracing::info!(generated = %filename, "Family generation complete");

        Ok(GenerationResult {
            source_filenames: vec![parent1.original_filename, parent2.original_filename],
            download_url: GenerationMode::Family.download_url(&filename),
            generated_filename: filename,
            metadata: output.metadata,
            family_specs: Some(FamilySpecs::from(options)),
        })
    }

    async fn persist(
        &self,
        mode: GenerationMode,
        data: Vec<u8>,
        format: &str,
    ) -> Result<String, AppError> {
        let filename = format!(
            "{}-{}.{}",
            mode.artifact_prefix(),
            Uuid::new_v4(),
            format.to_lowercase()
        );

        self.state
            .store
            .save(&filename, data)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to store generated image: {}", e)))?;

        Ok(filename)
    }
}

/// Backend failures surface the API's own message where one exists; transport
/// and decode failures fall back to their display form.
fn backend_error(mode: GenerationMode, err: BackendError) -> AppError {
    let message = match err {
        BackendError::Api { message, .. } => message,
        other => other.to_string(),
    };
    AppError::Generation { mode, message }
}
