//! In-memory blob storage.
//!
//! Behaves like the S3 backend from the caller's point of view, including
//! paginated prefix listings with continuation tokens. Used by tests and for
//! local development without AWS credentials.

use crate::traits::{BlobStorage, ObjectInfo, ObjectPage, StorageResult};
use crate::StorageBackendKind;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

const DEFAULT_PAGE_SIZE: usize = 1000;

#[derive(Debug, Clone)]
struct StoredObject {
    data: Bytes,
    content_type: String,
    metadata: HashMap<String, String>,
    last_modified: DateTime<Utc>,
}

/// Memory blob storage implementation.
///
/// Keys are kept in a sorted map so listings come back in lexicographic key
/// order, matching S3.
#[derive(Clone)]
pub struct MemoryStorage {
    objects: Arc<RwLock<BTreeMap<String, StoredObject>>>,
    page_size: usize,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Smaller pages make pagination observable in tests.
    pub fn with_page_size(page_size: usize) -> Self {
        MemoryStorage {
            objects: Arc::new(RwLock::new(BTreeMap::new())),
            page_size: page_size.max(1),
        }
    }

    /// Total number of stored objects, for test assertions.
    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }

    /// Raw bytes of an object, for test assertions.
    pub async fn object_bytes(&self, key: &str) -> Option<Bytes> {
        self.objects.read().await.get(key).map(|o| o.data.clone())
    }

    /// Stored metadata of an object, for test assertions.
    pub async fn object_metadata(&self, key: &str) -> Option<HashMap<String, String>> {
        self.objects
            .read()
            .await
            .get(key)
            .map(|o| o.metadata.clone())
    }

    /// Stored content type of an object, for test assertions.
    pub async fn object_content_type(&self, key: &str) -> Option<String> {
        self.objects
            .read()
            .await
            .get(key)
            .map(|o| o.content_type.clone())
    }
}

#[async_trait]
impl BlobStorage for MemoryStorage {
    async fn put_object(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
        metadata: HashMap<String, String>,
    ) -> StorageResult<()> {
        let mut objects = self.objects.write().await;
        // Same key overwrites: last write wins, exactly like S3.
        objects.insert(
            key.to_string(),
            StoredObject {
                data: Bytes::from(data),
                content_type: content_type.to_string(),
                metadata,
                last_modified: Utc::now(),
            },
        );
        Ok(())
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        // No signing for the memory backend; the URL encodes key and expiry
        // so callers can still assert on its shape.
        Ok(format!(
            "memory:///{}?expires_in={}",
            key,
            expires_in.as_secs()
        ))
    }

    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        Ok(format!(
            "memory:///{}?upload=1&content_type={}&expires_in={}",
            key,
            content_type,
            expires_in.as_secs()
        ))
    }

    async fn delete_object(&self, key: &str) -> StorageResult<()> {
        self.objects.write().await.remove(key);
        Ok(())
    }

    async fn list_page(
        &self,
        prefix: &str,
        continuation: Option<String>,
    ) -> StorageResult<ObjectPage> {
        let objects = self.objects.read().await;

        // Continuation token is the last key of the previous page.
        let lower = match &continuation {
            Some(token) => Bound::Excluded(token.clone()),
            None => Bound::Included(prefix.to_string()),
        };

        let mut page = Vec::with_capacity(self.page_size);
        let mut next_token = None;
        for (key, obj) in objects.range((lower, Bound::Unbounded)) {
            if !key.starts_with(prefix) {
                break;
            }
            if page.len() == self.page_size {
                next_token = page.last().map(|o: &ObjectInfo| o.key.clone());
                break;
            }
            page.push(ObjectInfo {
                key: key.clone(),
                size: obj.data.len() as i64,
                last_modified: obj.last_modified,
            });
        }

        Ok(ObjectPage {
            objects: page,
            next_token,
        })
    }

    async fn delete_objects(&self, keys: Vec<String>) -> StorageResult<()> {
        let mut objects = self.objects.write().await;
        for key in keys {
            objects.remove(&key);
        }
        Ok(())
    }

    fn backend_kind(&self) -> StorageBackendKind {
        StorageBackendKind::Memory
    }
}
