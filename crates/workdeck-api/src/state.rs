//! Application state shared by handlers.

use crate::services::{FileService, IdentityService, ProjectService, WorkspaceService};
use std::sync::Arc;
use workdeck_core::Config;
use workdeck_db::DocumentStore;
use workdeck_storage::BlobStorage;

/// Everything a handler can reach. Services hold the store trait objects;
/// the raw stores are also kept for health checks and test assertions.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub identity: IdentityService,
    pub workspaces: WorkspaceService,
    pub projects: ProjectService,
    pub files: FileService,
    pub documents: Arc<dyn DocumentStore>,
    pub storage: Arc<dyn BlobStorage>,
}
