//! Document store abstraction trait
//!
//! Every operation is a single-item read, write, or index query; the trait
//! deliberately mirrors what a partitioned document store actually offers.
//! Ordering of listings is store-defined, not chronological.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;
use workdeck_core::models::{Project, User, Workspace};

/// Document store operation errors
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Write failed: {0}")]
    PutFailed(String),

    #[error("Read failed: {0}")]
    GetFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Malformed record: {0}")]
    Malformed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for document store operations
pub type DocumentResult<T> = Result<T, DocumentError>;

impl From<DocumentError> for workdeck_core::AppError {
    fn from(err: DocumentError) -> Self {
        workdeck_core::AppError::Document(err.to_string())
    }
}

/// Persistence for the user → workspace → project hierarchy.
///
/// `put_*` overwrites whole records (updates are read-modify-put in the
/// service layer). Secondary lookups correspond to index queries:
/// `username` on users, `user_id` on workspaces and projects, and
/// `workspace_id` on projects.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn put_user(&self, user: &User) -> DocumentResult<()>;
    async fn get_user(&self, id: Uuid) -> DocumentResult<Option<User>>;
    /// Case-sensitive exact match.
    async fn get_user_by_username(&self, username: &str) -> DocumentResult<Option<User>>;

    async fn put_workspace(&self, workspace: &Workspace) -> DocumentResult<()>;
    async fn get_workspace(&self, id: Uuid) -> DocumentResult<Option<Workspace>>;
    async fn list_workspaces_by_owner(&self, owner_id: Uuid) -> DocumentResult<Vec<Workspace>>;
    async fn delete_workspace(&self, id: Uuid) -> DocumentResult<()>;

    async fn put_project(&self, project: &Project) -> DocumentResult<()>;
    async fn get_project(&self, id: Uuid) -> DocumentResult<Option<Project>>;
    async fn list_projects_by_workspace(&self, workspace_id: Uuid)
        -> DocumentResult<Vec<Project>>;
    async fn list_projects_by_owner(&self, owner_id: Uuid) -> DocumentResult<Vec<Project>>;
    async fn delete_project(&self, id: Uuid) -> DocumentResult<()>;
}
