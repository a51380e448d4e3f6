//! Project lifecycle.
//!
//! Projects always belong to a workspace owned by the same user; creation
//! derives the project's owner from the workspace rather than trusting the
//! request. The per-workspace cap is read-then-write, same caveat as the
//! workspace cap.

use crate::services::authz::authorize;
use crate::services::cascade::{CascadeDeleter, CascadeReport};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use workdeck_core::constants::PROJECTS_PER_WORKSPACE;
use workdeck_core::keys;
use workdeck_core::models::{CreateProjectRequest, Project, UpdateProjectRequest};
use workdeck_core::AppError;
use workdeck_db::DocumentStore;

#[derive(Clone)]
pub struct ProjectService {
    documents: Arc<dyn DocumentStore>,
    cascade: CascadeDeleter,
}

impl ProjectService {
    pub fn new(documents: Arc<dyn DocumentStore>, cascade: CascadeDeleter) -> Self {
        ProjectService { documents, cascade }
    }

    pub async fn create(&self, request: CreateProjectRequest) -> Result<Project, AppError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput(
                "Project name is required".to_string(),
            ));
        }

        // The workspace must exist and belong to the caller before anything
        // is counted or written.
        let workspace = self.documents.get_workspace(request.workspace_id).await?;
        let workspace = authorize(workspace, request.user_id, "Workspace")?;

        let existing = self
            .documents
            .list_projects_by_workspace(workspace.id)
            .await?;
        if existing.len() >= PROJECTS_PER_WORKSPACE {
            return Err(AppError::LimitReached {
                resource: "project",
                limit: PROJECTS_PER_WORKSPACE,
            });
        }

        let now = Utc::now();
        let project = Project {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: request.description,
            workspace_id: workspace.id,
            // Owner comes from the workspace record, not the request.
            user_id: workspace.user_id,
            created_at: now,
            updated_at: now,
        };
        self.documents.put_project(&project).await?;

        tracing::info!(project_id = %project.id, workspace_id = %project.workspace_id, "Project created");
        Ok(project)
    }

    pub async fn list_by_workspace(
        &self,
        workspace_id: Uuid,
        caller: Uuid,
    ) -> Result<Vec<Project>, AppError> {
        let workspace = self.documents.get_workspace(workspace_id).await?;
        let workspace = authorize(workspace, caller, "Workspace")?;
        Ok(self
            .documents
            .list_projects_by_workspace(workspace.id)
            .await?)
    }

    /// All projects the user owns, across workspaces.
    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Project>, AppError> {
        Ok(self.documents.list_projects_by_owner(owner_id).await?)
    }

    pub async fn get(&self, id: Uuid, caller: Uuid) -> Result<Project, AppError> {
        let project = self.documents.get_project(id).await?;
        authorize(project, caller, "Project")
    }

    pub async fn update(
        &self,
        id: Uuid,
        caller: Uuid,
        request: UpdateProjectRequest,
    ) -> Result<Project, AppError> {
        let mut project = self.get(id, caller).await?;

        if let Some(name) = request.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::InvalidInput(
                    "Project name is required".to_string(),
                ));
            }
            project.name = name;
        }
        if let Some(description) = request.description {
            project.description = Some(description);
        }
        project.updated_at = Utc::now();

        self.documents.put_project(&project).await?;
        Ok(project)
    }

    /// Delete a project: cascade its blob objects, then remove the record.
    pub async fn delete(&self, id: Uuid, caller: Uuid) -> Result<CascadeReport, AppError> {
        let project = self.get(id, caller).await?;

        let prefix = keys::project_prefix(project.user_id, project.workspace_id, project.id);
        let report = self.cascade.delete_prefix(&prefix).await;

        self.documents.delete_project(project.id).await?;
        tracing::info!(
            project_id = %project.id,
            objects_deleted = report.objects_deleted,
            cascade_complete = report.is_complete(),
            "Project deleted"
        );
        Ok(report)
    }
}
