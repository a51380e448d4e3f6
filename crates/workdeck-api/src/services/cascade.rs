//! Prefix-scoped cascade deletion of blob objects.
//!
//! Deleting a workspace or project removes every object under its key
//! prefix. Listings are paginated, so the deleter walks pages sequentially
//! and bulk-deletes each page's keys. A storage failure mid-walk stops the
//! walk and is carried in the report instead of aborting the caller: the
//! owning record is removed regardless, and leftover objects are surfaced
//! through logs for operator cleanup.

use std::sync::Arc;
use workdeck_storage::{BlobStorage, StorageError};

/// Outcome of one cascade pass.
#[derive(Debug)]
pub struct CascadeReport {
    /// Objects removed before the walk ended.
    pub objects_deleted: usize,
    /// Listing pages processed.
    pub pages: usize,
    /// First storage failure, if the walk ended early.
    pub error: Option<StorageError>,
}

impl CascadeReport {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Clone)]
pub struct CascadeDeleter {
    storage: Arc<dyn BlobStorage>,
}

impl CascadeDeleter {
    pub fn new(storage: Arc<dyn BlobStorage>) -> Self {
        CascadeDeleter { storage }
    }

    /// Delete every object under `prefix`. A prefix with no objects is a
    /// clean no-op.
    pub async fn delete_prefix(&self, prefix: &str) -> CascadeReport {
        let mut report = CascadeReport {
            objects_deleted: 0,
            pages: 0,
            error: None,
        };
        let mut continuation = None;

        loop {
            let page = match self.storage.list_page(prefix, continuation).await {
                Ok(page) => page,
                Err(e) => {
                    report.error = Some(e);
                    break;
                }
            };
            report.pages += 1;

            let keys: Vec<String> = page.objects.into_iter().map(|o| o.key).collect();
            let count = keys.len();
            if count > 0 {
                if let Err(e) = self.storage.delete_objects(keys).await {
                    report.error = Some(e);
                    break;
                }
                report.objects_deleted += count;
            }

            match page.next_token {
                Some(token) => continuation = Some(token),
                None => break,
            }
        }

        if let Some(ref error) = report.error {
            tracing::warn!(
                prefix = %prefix,
                objects_deleted = report.objects_deleted,
                pages = report.pages,
                error = %error,
                "Cascade deletion ended early; orphaned objects may remain"
            );
        } else {
            tracing::info!(
                prefix = %prefix,
                objects_deleted = report.objects_deleted,
                pages = report.pages,
                "Cascade deletion complete"
            );
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use workdeck_storage::MemoryStorage;

    async fn seed(storage: &MemoryStorage, prefix: &str, n: usize) {
        for i in 0..n {
            storage
                .put_object(
                    &format!("{}f-{:04}", prefix, i),
                    vec![1u8; 4],
                    "application/octet-stream",
                    HashMap::new(),
                )
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn empty_prefix_is_a_clean_noop() {
        let storage = Arc::new(MemoryStorage::new());
        let deleter = CascadeDeleter::new(storage);

        let report = deleter.delete_prefix("users/none/").await;
        assert!(report.is_complete());
        assert_eq!(report.objects_deleted, 0);
    }

    #[tokio::test]
    async fn deletes_across_multiple_pages() {
        let storage = Arc::new(MemoryStorage::with_page_size(10));
        seed(&storage, "users/a/", 25).await;
        seed(&storage, "users/b/", 3).await;

        let deleter = CascadeDeleter::new(storage.clone());
        let report = deleter.delete_prefix("users/a/").await;

        assert!(report.is_complete());
        assert_eq!(report.objects_deleted, 25);
        assert!(report.pages >= 3);
        // Neighboring prefix untouched.
        assert_eq!(storage.object_count().await, 3);
    }
}
