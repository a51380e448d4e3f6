use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// View of a stored blob object, scoped to its owning project.
///
/// `key` is derived from `(user, workspace, project, name)` — see
/// [`crate::keys`]. There is no separate file record in the document store;
/// the blob listing is the source of truth.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileItem {
    pub key: String,
    pub name: String,
    /// Size in bytes.
    pub size: i64,
    pub last_modified: DateTime<Utc>,
    pub project_id: Uuid,
    pub workspace_id: Uuid,
    pub user_id: Uuid,
}
