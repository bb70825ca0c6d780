//! Generation result model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::FamilyOptions;

/// Which of the two generation pipelines produced a result or an error.
///
/// The mode decides the download URL prefix and the generated filename prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    Portrait,
    Family,
}

impl GenerationMode {
    /// Fixed path template under which generated artifacts are served.
    pub fn download_url(&self, filename: &str) -> String {
        match self {
            GenerationMode::Portrait => format!("/api/images/download/{}", filename),
            GenerationMode::Family => format!("/api/family/download/{}", filename),
        }
    }

    /// Prefix for orchestrator-assigned artifact filenames.
    pub fn artifact_prefix(&self) -> &'static str {
        match self {
            GenerationMode::Portrait => "generated",
            GenerationMode::Family => "family",
        }
    }
}

/// Composition of the generated family, derived from the validated options.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FamilySpecs {
    pub number_of_children: i64,
    pub age_gap: i64,
    pub youngest_age: i64,
    pub oldest_age: i64,
    /// Per-child ages, youngest first.
    pub child_ages: Vec<i64>,
}

impl From<&FamilyOptions> for FamilySpecs {
    fn from(options: &FamilyOptions) -> Self {
        Self {
            number_of_children: options.number_of_children,
            age_gap: options.age_gap,
            youngest_age: options.youngest_age,
            oldest_age: options.oldest_age(),
            child_ages: options.child_ages(),
        }
    }
}

/// Result of a generation call, immutable once returned by the orchestrator.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// Original filenames of the source upload(s), echoed back to the caller.
    pub source_filenames: Vec<String>,
    /// Opaque, orchestrator-assigned name of the stored artifact.
    pub generated_filename: String,
    /// Fixed-template download path for the artifact.
    pub download_url: String,
    /// Free-form metadata reported by the backend.
    pub metadata: serde_json::Value,
    /// Present in family mode only.
    pub family_specs: Option<FamilySpecs>,
}
