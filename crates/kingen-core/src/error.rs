//! Error types module
//!
//! This module provides the core error types used throughout the kingen
//! application. All errors are unified under the `AppError` enum, covering
//! intake, option validation, backend generation, and artifact lookup failures.
//!
//! Every error renders through the same response envelope
//! (`{success: false, error, message}`); the `ErrorMetadata` trait supplies the
//! HTTP status code, the short error title, and the client-facing message.

use crate::models::GenerationMode;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented.
/// This trait allows errors to self-describe their HTTP response characteristics.
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Short error title for the response envelope (e.g. "Invalid image file")
    fn error_title(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether the message should be replaced with a generic one in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Single-image endpoint received no usable file part.
    #[error("no image file provided")]
    NoFileProvided,

    /// Family endpoint received fewer than two file parts.
    #[error("insufficient images provided")]
    InsufficientImages,

    /// Transport-level upload failure (unreadable multipart, too many files).
    #[error("upload error: {0}")]
    UploadError(String),

    /// A provided image failed structural validation (empty payload, bad type).
    #[error("invalid image file: {0}")]
    InvalidImage(String),

    /// Resolved family options violate the composition constraints.
    #[error("invalid family options: {0}")]
    InvalidOptions(String),

    /// Artifact filename does not resolve to a stored file.
    #[error("not found: {0}")]
    NotFound(String),

    /// The external generation backend call failed.
    #[error("generation failed: {message}")]
    Generation {
        mode: GenerationMode,
        message: String,
    },

    /// Anything uncategorized.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        match self {
            AppError::NoFileProvided
            | AppError::InsufficientImages
            | AppError::UploadError(_)
            | AppError::InvalidImage(_)
            | AppError::InvalidOptions(_) => 400,
            AppError::NotFound(_) => 404,
            AppError::Generation { .. } | AppError::Internal(_) => 500,
        }
    }

    fn error_title(&self) -> &'static str {
        match self {
            AppError::NoFileProvided => "No image file provided",
            AppError::InsufficientImages => "Insufficient images provided",
            AppError::UploadError(_) => "Upload error",
            AppError::InvalidImage(_) => "Invalid image file",
            AppError::InvalidOptions(_) => "Invalid family options",
            AppError::NotFound(_) => "File not found",
            AppError::Generation {
                mode: GenerationMode::Portrait,
                ..
            } => "Image generation failed",
            AppError::Generation {
                mode: GenerationMode::Family,
                ..
            } => "Family generation failed",
            AppError::Internal(_) => "Internal server error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            AppError::NoFileProvided => {
                "Please upload an image file. Use field name \"image\" or \"file\"".to_string()
            }
            AppError::InsufficientImages => {
                "Please upload exactly 2 images (one for each parent). Use field names \
                 'parent1' and 'parent2' or upload any 2 images."
                    .to_string()
            }
            AppError::UploadError(msg) => msg.clone(),
            AppError::InvalidImage(msg) => msg.clone(),
            AppError::InvalidOptions(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Generation { message, .. } => message.clone(),
            AppError::Internal(_) => "An unexpected error occurred".to_string(),
        }
    }

    fn is_sensitive(&self) -> bool {
        // Internal details never reach the caller; the backend's own error
        // message is part of the contract and is returned as-is.
        matches!(self, AppError::Internal(_))
    }

    fn log_level(&self) -> LogLevel {
        match self {
            AppError::Generation { .. } | AppError::Internal(_) => LogLevel::Error,
            _ => LogLevel::Debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intake_errors_are_400() {
        assert_eq!(AppError::NoFileProvided.http_status_code(), 400);
        assert_eq!(AppError::InsufficientImages.http_status_code(), 400);
        assert_eq!(
            AppError::UploadError("bad part".to_string()).http_status_code(),
            400
        );
        assert_eq!(
            AppError::InvalidImage("empty".to_string()).http_status_code(),
            400
        );
        assert_eq!(
            AppError::InvalidOptions("range".to_string()).http_status_code(),
            400
        );
    }

    #[test]
    fn test_not_found_metadata() {
        let err = AppError::NotFound("The requested image file does not exist".to_string());
        assert_eq!(err.http_status_code(), 404);
        assert_eq!(err.error_title(), "File not found");
        assert_eq!(
            err.client_message(),
            "The requested image file does not exist"
        );
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_generation_title_tracks_mode() {
        let portrait = AppError::Generation {
            mode: GenerationMode::Portrait,
            message: "backend unavailable".to_string(),
        };
        assert_eq!(portrait.http_status_code(), 500);
        assert_eq!(portrait.error_title(), "Image generation failed");
        assert_eq!(portrait.client_message(), "backend unavailable");
        assert!(!portrait.is_sensitive());

        let family = AppError::Generation {
            mode: GenerationMode::Family,
            message: "quota exceeded".to_string(),
        };
        assert_eq!(family.error_title(), "Family generation failed");
        assert_eq!(family.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_internal_is_sensitive() {
        let err = AppError::Internal("disk on fire at /var/lib".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert!(err.is_sensitive());
        assert_eq!(err.client_message(), "An unexpected error occurred");
    }
}
