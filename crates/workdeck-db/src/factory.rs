//! Backend selection from configuration.

use crate::{DocumentResult, DocumentStore, DynamoStore, MemoryStore};
use std::sync::Arc;
use workdeck_core::{Config, DocumentBackend};

/// Create a document store backend based on configuration.
///
/// The DynamoDB backend provisions its tables on startup so a fresh
/// environment works without manual setup.
pub async fn create_document_store(config: &Config) -> DocumentResult<Arc<dyn DocumentStore>> {
    match config.document_backend {
        DocumentBackend::DynamoDb => {
            let store = DynamoStore::new(config).await?;
            store.ensure_tables().await?;
            tracing::info!(
                users_table = %config.users_table,
                workspaces_table = %config.workspaces_table,
                projects_table = %config.projects_table,
                "Using DynamoDB document store"
            );
            Ok(Arc::new(store))
        }
        DocumentBackend::Memory => {
            tracing::warn!("Using in-memory document store; records will not survive restarts");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
