//! Workspace lifecycle.
//!
//! Quota note: the per-user workspace cap is enforced by counting before
//! writing. The store has no cross-item transactions, so two concurrent
//! creates can both pass the count and land the user one over the cap. The
//! cap is a product guardrail, not a hard invariant.

use crate::services::authz::authorize;
use crate::services::cascade::{CascadeDeleter, CascadeReport};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use workdeck_core::constants::WORKSPACES_PER_USER;
use workdeck_core::keys;
use workdeck_core::models::{CreateWorkspaceRequest, UpdateWorkspaceRequest, Workspace};
use workdeck_core::AppError;
use workdeck_db::DocumentStore;

#[derive(Clone)]
pub struct WorkspaceService {
    documents: Arc<dyn DocumentStore>,
    cascade: CascadeDeleter,
}

impl WorkspaceService {
    pub fn new(documents: Arc<dyn DocumentStore>, cascade: CascadeDeleter) -> Self {
        WorkspaceService { documents, cascade }
    }

    pub async fn create(&self, request: CreateWorkspaceRequest) -> Result<Workspace, AppError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput(
                "Workspace name is required".to_string(),
            ));
        }

        let existing = self
            .documents
            .list_workspaces_by_owner(request.user_id)
            .await?;
        if existing.len() >= WORKSPACES_PER_USER {
            return Err(AppError::LimitReached {
                resource: "workspace",
                limit: WORKSPACES_PER_USER,
            });
        }

        let now = Utc::now();
        let workspace = Workspace {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: request.description,
            user_id: request.user_id,
            created_at: now,
            updated_at: now,
        };
        self.documents.put_workspace(&workspace).await?;

        tracing::info!(workspace_id = %workspace.id, user_id = %workspace.user_id, "Workspace created");
        Ok(workspace)
    }

    pub async fn list(&self, owner_id: Uuid) -> Result<Vec<Workspace>, AppError> {
        Ok(self.documents.list_workspaces_by_owner(owner_id).await?)
    }

    pub async fn get(&self, id: Uuid, caller: Uuid) -> Result<Workspace, AppError> {
        let workspace = self.documents.get_workspace(id).await?;
        authorize(workspace, caller, "Workspace")
    }

    pub async fn update(
        &self,
        id: Uuid,
        caller: Uuid,
        request: UpdateWorkspaceRequest,
    ) -> Result<Workspace, AppError> {
        let mut workspace = self.get(id, caller).await?;

        if let Some(name) = request.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::InvalidInput(
                    "Workspace name is required".to_string(),
                ));
            }
            workspace.name = name;
        }
        if let Some(description) = request.description {
            workspace.description = Some(description);
        }
        workspace.updated_at = Utc::now();

        // Read-modify-put: concurrent updates to the same record race, last
        // write wins.
        self.documents.put_workspace(&workspace).await?;
        Ok(workspace)
    }

    /// Delete a workspace: cascade its blob objects (all projects' files),
    /// then remove the record.
    ///
    /// Project records under the workspace are not removed here; they become
    /// unreachable through the API (their workspace authorization fails) and
    /// their files are already gone via the prefix cascade.
    pub async fn delete(&self, id: Uuid, caller: Uuid) -> Result<CascadeReport, AppError> {
        let workspace = self.get(id, caller).await?;

        let prefix = keys::workspace_prefix(workspace.user_id, workspace.id);
        let report = self.cascade.delete_prefix(&prefix).await;

        // Record removal proceeds even when the cascade ended early; the
        // report carries what happened and the cascade already logged it.
        self.documents.delete_workspace(workspace.id).await?;
        tracing::info!(
            workspace_id = %workspace.id,
            objects_deleted = report.objects_deleted,
            cascade_complete = report.is_complete(),
            "Workspace deleted"
        );
        Ok(report)
    }
}
