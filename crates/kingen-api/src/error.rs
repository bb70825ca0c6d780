//! HTTP error response conversion
//!
//! This module provides HTTP-specific error response conversion for AppError.
//!
//! **Preferred handler pattern:** Return `Result<impl IntoResponse, HttpAppError>`.
//! Use `AppError` (or types that implement `Into<AppError>`) for errors so they
//! become `HttpAppError` and render consistently (status, envelope, logging).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kingen_core::{AppError, ErrorMetadata, LogLevel};
use kingen_storage::StorageError;
use serde::Serialize;
use utoipa::ToSchema;

/// The stable error envelope shared by every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    /// Short error title (e.g. "Invalid image file")
    pub error: String,
    /// Human-readable message identifying the problem
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: message.into(),
        }
    }
}

/// Wrapper type for AppError to implement IntoResponse.
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from kingen-core).
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::Internal(err.to_string()))
    }
}

/// Storage failures outside the download/info handlers (which map `NotFound`
/// themselves with an endpoint-specific message) are internal errors.
impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            StorageError::NotFound(filename) => {
                AppError::NotFound(format!("The requested file does not exist: {}", filename))
            }
            other => AppError::Internal(other.to_string()),
        };
        HttpAppError(app)
    }
}

fn log_error(error: &AppError) {
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, "Request failed");
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        // Sensitive errors expose their real message outside production only;
        // the envelope shape never changes.
        let message = if app_error.is_sensitive() && !is_production_env() {
            app_error.to_string()
        } else {
            app_error.client_message()
        };

        let body = Json(ErrorResponse::new(app_error.error_title(), message));

        (status, body).into_response()
    }
}
