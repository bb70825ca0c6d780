//! Storage abstraction trait
//!
//! This module defines the ArtifactStore trait that storage backends implement.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid artifact filename: {0}")]
    InvalidFilename(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Filesystem attributes of a stored artifact.
///
/// For an unmodified artifact, repeated lookups return identical values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactInfo {
    pub size: u64,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// A byte stream over a stored artifact.
pub type ArtifactStream = Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>;

/// Filename-addressed store for generated artifacts.
///
/// There is deliberately no enumeration operation: filenames must be known
/// from a prior generation response. Concurrent reads of distinct filenames
/// are independent; a read racing a concurrent write of the same filename is
/// accepted (last-writer-wins).
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Persist a generated artifact under the given filename.
    async fn save(&self, filename: &str, data: Vec<u8>) -> StorageResult<()>;

    /// Check whether an artifact exists.
    async fn exists(&self, filename: &str) -> StorageResult<bool>;

    /// Size and timestamps of an artifact; `NotFound` when absent.
    async fn info(&self, filename: &str) -> StorageResult<ArtifactInfo>;

    /// Open an artifact for streamed download; `NotFound` when absent.
    async fn open(&self, filename: &str) -> StorageResult<ArtifactStream>;
}
