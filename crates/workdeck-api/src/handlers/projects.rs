use crate::error::{ErrorResponse, HttpAppError, ValidatedJson, ValidatedQuery};
use crate::handlers::workspaces::MessageResponse;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;
use workdeck_core::models::{CreateProjectRequest, Project, UpdateProjectRequest};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProjectsQuery {
    pub user_id: Uuid,
    /// When present, list that workspace's projects; otherwise every project
    /// the user owns.
    pub workspace_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSelector {
    pub id: Uuid,
    pub user_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectsResponse {
    pub projects: Vec<Project>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectResponse {
    pub project: Project,
}

#[utoipa::path(
    get,
    path = "/api/projects",
    tag = "projects",
    params(
        ("userId" = Uuid, Query, description = "Owner user id"),
        ("workspaceId" = Option<Uuid>, Query, description = "Restrict to one workspace")
    ),
    responses(
        (status = 200, description = "Projects visible to the user", body = ProjectsResponse),
        (status = 400, description = "Workspace not found or not owned by the user", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(user_id = %query.user_id, workspace_id = ?query.workspace_id))]
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(query): ValidatedQuery<ListProjectsQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let projects = match query.workspace_id {
        Some(workspace_id) => {
            state
                .projects
                .list_by_workspace(workspace_id, query.user_id)
                .await?
        }
        None => state.projects.list_by_owner(query.user_id).await?,
    };
    Ok(Json(ProjectsResponse { projects }))
}

#[utoipa::path(
    post,
    path = "/api/projects",
    tag = "projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = ProjectResponse),
        (status = 400, description = "Invalid input, workspace not owned, or project limit reached", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(workspace_id = %request.workspace_id, user_id = %request.user_id))]
pub async fn create_project(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CreateProjectRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let project = state.projects.create(request).await?;
    Ok((StatusCode::CREATED, Json(ProjectResponse { project })))
}

#[utoipa::path(
    put,
    path = "/api/projects",
    tag = "projects",
    params(
        ("id" = Uuid, Query, description = "Project id"),
        ("userId" = Uuid, Query, description = "Owner user id")
    ),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Project updated", body = ProjectResponse),
        (status = 400, description = "Not found or not owned by the user", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(project_id = %selector.id, user_id = %selector.user_id))]
pub async fn update_project(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(selector): ValidatedQuery<ProjectSelector>,
    ValidatedJson(request): ValidatedJson<UpdateProjectRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let project = state
        .projects
        .update(selector.id, selector.user_id, request)
        .await?;
    Ok(Json(ProjectResponse { project }))
}

#[utoipa::path(
    delete,
    path = "/api/projects",
    tag = "projects",
    params(
        ("id" = Uuid, Query, description = "Project id"),
        ("userId" = Uuid, Query, description = "Owner user id")
    ),
    responses(
        (status = 200, description = "Project and its files deleted", body = MessageResponse),
        (status = 400, description = "Not found or not owned by the user", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(project_id = %selector.id, user_id = %selector.user_id))]
pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(selector): ValidatedQuery<ProjectSelector>,
) -> Result<impl IntoResponse, HttpAppError> {
    let report = state
        .projects
        .delete(selector.id, selector.user_id)
        .await?;
    let message = if report.is_complete() {
        "Project deleted successfully".to_string()
    } else {
        "Project deleted; some stored files could not be removed".to_string()
    };
    Ok(Json(MessageResponse { message }))
}
