//! Application setup and initialization
//!
//! Wiring lives here rather than in main.rs so integration tests can build
//! the same state and router against in-memory backends.

pub mod routes;
pub mod server;

use crate::services::{
    CascadeDeleter, FileService, IdentityService, ProjectService, WorkspaceService,
};
use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use workdeck_core::Config;
use workdeck_db::DocumentStore;
use workdeck_storage::BlobStorage;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    let documents = workdeck_db::factory::create_document_store(&config)
        .await
        .context("Failed to initialize document store")?;
    let storage = workdeck_storage::factory::create_blob_storage(&config)
        .await
        .context("Failed to initialize blob storage")?;

    let state = build_state(config.clone(), documents, storage);
    let router = routes::build_router(&config, state.clone());

    Ok((state, router))
}

/// Assemble services and shared state from already-constructed stores.
pub fn build_state(
    config: Config,
    documents: Arc<dyn DocumentStore>,
    storage: Arc<dyn BlobStorage>,
) -> Arc<AppState> {
    let cascade = CascadeDeleter::new(storage.clone());
    Arc::new(AppState {
        identity: IdentityService::new(documents.clone()),
        workspaces: WorkspaceService::new(documents.clone(), cascade.clone()),
        projects: ProjectService::new(documents.clone(), cascade),
        files: FileService::new(documents.clone(), storage.clone()),
        config,
        documents,
        storage,
    })
}
