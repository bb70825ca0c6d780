use bytes::Bytes;

/// A single uploaded image, buffered in memory for the duration of the request.
///
/// Created from the transport layer's multipart parts and discarded once the
/// orchestrator has consumed it; raw uploads are never persisted.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub data: Bytes,
    pub original_filename: String,
    pub content_type: String,
}

impl UploadedImage {
    pub fn new(
        data: Bytes,
        original_filename: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            data,
            original_filename: original_filename.into(),
            content_type: content_type.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
