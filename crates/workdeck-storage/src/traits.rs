//! Storage abstraction trait
//!
//! All blob backends (S3, in-memory) implement this trait so the file
//! service and the cascade deleter can work against either without coupling
//! to SDK types.

use crate::StorageBackendKind;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Listing failed: {0}")]
    ListFailed(String),

    #[error("Presigning failed: {0}")]
    PresignFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for workdeck_core::AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(msg) => workdeck_core::AppError::NotFoundOrForbidden(msg),
            other => workdeck_core::AppError::Storage(other.to_string()),
        }
    }
}

/// Minimal view of a stored object, as reported by a listing.
#[derive(Debug, Clone)]
pub struct ObjectInfo {
    pub key: String,
    pub size: i64,
    pub last_modified: DateTime<Utc>,
}

/// One page of a prefix listing. `next_token` is an opaque continuation
/// token; `Some` means more pages remain and must be fetched sequentially.
#[derive(Debug, Clone)]
pub struct ObjectPage {
    pub objects: Vec<ObjectInfo>,
    pub next_token: Option<String>,
}

/// Blob storage abstraction.
///
/// Offers only single-object writes plus paginated prefix listing and bulk
/// deletion — mirroring what the underlying object store actually
/// guarantees. There are deliberately no multi-object transactions.
#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Store an object under `key`, overwriting any existing object with the
    /// same key (last write wins).
    async fn put_object(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
        metadata: HashMap<String, String>,
    ) -> StorageResult<()>;

    /// Generate a time-limited GET URL for direct retrieval. Bytes are never
    /// streamed through the application.
    async fn presign_get(&self, key: &str, expires_in: Duration) -> StorageResult<String>;

    /// Generate a time-limited PUT URL for direct uploads.
    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> StorageResult<String>;

    /// Remove a single object. Removing a nonexistent key is not an error.
    async fn delete_object(&self, key: &str) -> StorageResult<()>;

    /// List one page of objects under `prefix`, resuming from `continuation`
    /// if given.
    async fn list_page(
        &self,
        prefix: &str,
        continuation: Option<String>,
    ) -> StorageResult<ObjectPage>;

    /// Bulk-delete the given keys. An empty slice is a successful no-op.
    async fn delete_objects(&self, keys: Vec<String>) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_kind(&self) -> StorageBackendKind;
}
