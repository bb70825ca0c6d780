use crate::traits::{ArtifactInfo, ArtifactStore, ArtifactStream, StorageError, StorageResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem artifact store
#[derive(Clone)]
pub struct LocalArtifactStore {
    base_path: PathBuf,
}

impl LocalArtifactStore {
    /// Create a new LocalArtifactStore rooted at `base_path`
    /// (e.g. "./uploads"), creating the directory if needed.
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create artifact directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalArtifactStore { base_path })
    }

    /// Resolve an artifact filename to a filesystem path.
    ///
    /// Filenames are opaque single path segments; anything that could escape
    /// the base directory (traversal sequences, absolute paths, separators)
    /// is rejected before touching the filesystem.
    fn filename_to_path(&self, filename: &str) -> StorageResult<PathBuf> {
        if filename.is_empty()
            || filename.contains("..")
            || filename.contains('/')
            || filename.contains('\\')
        {
            return Err(StorageError::InvalidFilename(
                "Artifact filename contains invalid characters".to_string(),
            ));
        }

        Ok(self.base_path.join(filename))
    }

    async fn stat(&self, path: &Path, filename: &str) -> StorageResult<std::fs::Metadata> {
        match fs::metadata(path).await {
            Ok(meta) => Ok(meta),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(filename.to_string()))
            }
            Err(e) => Err(StorageError::ReadFailed(format!(
                "Failed to stat file {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

fn to_datetime(time: std::io::Result<SystemTime>, fallback: DateTime<Utc>) -> DateTime<Utc> {
    time.map(DateTime::<Utc>::from).unwrap_or(fallback)
}

#[async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn save(&self, filename: &str, data: Vec<u8>) -> StorageResult<()> {
        let path = self.filename_to_path(filename)?;
        let size = data.len();
        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            filename = %filename,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Artifact saved"
        );

        Ok(())
    }

    async fn exists(&self, filename: &str) -> StorageResult<bool> {
        let path = self.filename_to_path(filename)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    async fn info(&self, filename: &str) -> StorageResult<ArtifactInfo> {
        let path = self.filename_to_path(filename)?;
        let meta = self.stat(&path, filename).await?;

        let modified = to_datetime(meta.modified(), Utc::now());
        // Birth time is unavailable on some filesystems; fall back to mtime.
        let created = to_datetime(meta.created(), modified);

        Ok(ArtifactInfo {
            size: meta.len(),
            created,
            modified,
        })
    }

    async fn open(&self, filename: &str) -> StorageResult<ArtifactStream> {
        let path = self.filename_to_path(filename)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(filename.to_string()));
        }

        let file = fs::File::open(&path).await.map_err(|e| {
            StorageError::ReadFailed(format!("Failed to open file {}: {}", path.display(), e))
        })?;

        let reader = tokio_util::io::ReaderStream::new(file);

        let path_display = path.display().to_string();
        let stream = reader.map(move |result| {
            result.map_err(|e| {
                tracing::error!(path = %path_display, error = %e, "Artifact stream read error");
                StorageError::ReadFailed(format!("Failed to read chunk: {}", e))
            })
        });

        Ok(Box::pin(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use tempfile::tempdir;

    async fn store() -> (tempfile::TempDir, LocalArtifactStore) {
        let dir = tempdir().unwrap();
        let store = LocalArtifactStore::new(dir.path()).await.unwrap();
        (dir, store)
    }

    async fn collect(mut stream: ArtifactStream) -> Vec<u8> {
        let mut data = Vec::new();
        while let Some(chunk) = stream.next().await {
            data.extend_from_slice(&chunk.unwrap());
        }
        data
    }

    #[tokio::test]
    async fn test_save_and_open() {
        let (_dir, store) = store().await;
        let data = b"generated image bytes".to_vec();

        store.save("family-abc.jpeg", data.clone()).await.unwrap();

        let downloaded = collect(store.open("family-abc.jpeg").await.unwrap()).await;
        assert_eq!(data, downloaded);
    }

    #[tokio::test]
    async fn test_exists() {
        let (_dir, store) = store().await;

        store.save("generated-1.jpeg", b"x".to_vec()).await.unwrap();

        assert!(store.exists("generated-1.jpeg").await.unwrap());
        assert!(!store.exists("generated-2.jpeg").await.unwrap());
    }

    #[tokio::test]
    async fn test_open_missing_is_not_found() {
        let (_dir, store) = store().await;

        let result = store.open("nope.jpeg").await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));

        let result = store.info("nope.jpeg").await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let (_dir, store) = store().await;

        for name in ["../../../etc/passwd", "..", "a/b.jpeg", "/etc/passwd", "a\\b", ""] {
            let result = store.open(name).await;
            assert!(
                matches!(result, Err(StorageError::InvalidFilename(_))),
                "{:?} should be rejected",
                name
            );
        }
    }

    #[tokio::test]
    async fn test_info_reports_size_and_is_idempotent() {
        let (_dir, store) = store().await;
        let data = b"twelve bytes".to_vec();

        store.save("generated-x.jpeg", data.clone()).await.unwrap();

        let first = store.info("generated-x.jpeg").await.unwrap();
        assert_eq!(first.size, data.len() as u64);
        assert!(first.created <= first.modified);

        let second = store.info("generated-x.jpeg").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_save_overwrites_last_writer_wins() {
        let (_dir, store) = store().await;

        store.save("generated-y.jpeg", b"old".to_vec()).await.unwrap();
        store.save("generated-y.jpeg", b"newer".to_vec()).await.unwrap();

        let data = collect(store.open("generated-y.jpeg").await.unwrap()).await;
        assert_eq!(data, b"newer");
    }
}
