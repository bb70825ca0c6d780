//! Multipart upload intake.
//!
//! Buffers every part of a multipart request in memory: file parts into an
//! ordered list tagged with their field name, text parts into a body-field
//! map that feeds option resolution. File selection is a two-stage lookup:
//! explicit named fields first, positional fallback over arrival order
//! otherwise, to tolerate client variance.

use axum::extract::Multipart;
use bytes::Bytes;
use kingen_core::models::FieldMap;
use kingen_core::{AppError, UploadedImage};

/// Everything extracted from a multipart request body.
pub struct RequestParts {
    /// File parts in arrival order, each tagged with its field name.
    files: Vec<(String, UploadedImage)>,
    /// Text parts (form fields), for option resolution.
    pub fields: FieldMap,
}

impl RequestParts {
    /// Read and buffer all parts of the request.
    ///
    /// `max_files` caps file parts per request (1 for portrait mode, 2 for
    /// family mode); excess file parts are an upload error, not silently
    /// dropped.
    pub async fn read(mut multipart: Multipart, max_files: usize) -> Result<Self, AppError> {
        let mut files = Vec::new();
        let mut fields = FieldMap::new();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::UploadError(format!("Failed to read multipart request: {}", e)))?
        {
            let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

            if let Some(filename) = field.file_name().map(|s| s.to_string()) {
                if files.len() >= max_files {
                    return Err(AppError::UploadError(format!(
                        "Too many files uploaded; expected at most {}",
                        max_files
                    )));
                }

                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let data: Bytes = field.bytes().await.map_err(|e| {
                    AppError::UploadError(format!("Failed to read file data: {}", e))
                })?;

                files.push((
                    field_name,
                    UploadedImage::new(data, filename, content_type),
                ));
            } else {
                let value = field.text().await.map_err(|e| {
                    AppError::UploadError(format!("Failed to read form field: {}", e))
                })?;
                fields.insert(field_name, value);
            }
        }

        Ok(Self { files, fields })
    }

    fn named(&self, name: &str) -> Option<&UploadedImage> {
        self.files
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, file)| file)
    }

    /// Select the upload for single-image mode: field `image`, then `file`,
    /// then the first file in arrival order.
    pub fn single_image(self) -> Result<(UploadedImage, FieldMap), AppError> {
        let image = self
            .named("image")
            .or_else(|| self.named("file"))
            .or_else(|| self.files.first().map(|(_, file)| file))
            .cloned()
            .ok_or(AppError::NoFileProvided)?;

        Ok((image, self.fields))
    }

    /// Select the two uploads for family mode: `parent1`+`parent2` named
    /// fields when both are present, otherwise the first two files in
    /// arrival order.
    pub fn parent_images(self) -> Result<(UploadedImage, UploadedImage, FieldMap), AppError> {
        let named = match (self.named("parent1"), self.named("parent2")) {
            (Some(p1), Some(p2)) => Some((p1.clone(), p2.clone())),
            _ => None,
        };

        let (parent1, parent2) = match named {
            Some(pair) => pair,
            None => {
                if self.files.len() < 2 {
                    return Err(AppError::InsufficientImages);
                }
                (self.files[0].1.clone(), self.files[1].1.clone())
            }
        };

        Ok((parent1, parent2, self.fields))
    }
}
