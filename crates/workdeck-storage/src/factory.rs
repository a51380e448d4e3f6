//! Backend selection from configuration.

use crate::{BlobStorage, MemoryStorage, S3Storage, StorageResult};
use std::sync::Arc;
use workdeck_core::{Config, StorageBackend};

/// Create a blob storage backend based on configuration.
pub async fn create_blob_storage(config: &Config) -> StorageResult<Arc<dyn BlobStorage>> {
    match config.storage_backend {
        StorageBackend::S3 => {
            let storage = S3Storage::new(
                config.s3_bucket.clone(),
                config.aws_region.clone(),
                config.s3_endpoint.clone(),
            )
            .await?;
            tracing::info!(bucket = %config.s3_bucket, region = %config.aws_region, "Using S3 blob storage");
            Ok(Arc::new(storage))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory blob storage; objects will not survive restarts");
            Ok(Arc::new(MemoryStorage::new()))
        }
    }
}
