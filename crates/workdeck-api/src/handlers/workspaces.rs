use crate::error::{ErrorResponse, HttpAppError, ValidatedJson, ValidatedQuery};
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
use workdeck_core::models::{CreateWorkspaceRequest, UpdateWorkspaceRequest, Workspace};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSelector {
    pub id: Uuid,
    pub user_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WorkspacesResponse {
    pub workspaces: Vec<Workspace>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WorkspaceResponse {
    pub workspace: Workspace,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/api/workspaces",
    tag = "workspaces",
    params(("userId" = Uuid, Query, description = "Owner user id")),
    responses(
        (status = 200, description = "Workspaces owned by the user", body = WorkspacesResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(user_id = %query.user_id))]
pub async fn list_workspaces(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(query): ValidatedQuery<OwnerQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let workspaces = state.workspaces.list(query.user_id).await?;
    Ok(Json(WorkspacesResponse { workspaces }))
}

#[utoipa::path(
    post,
    path = "/api/workspaces",
    tag = "workspaces",
    request_body = CreateWorkspaceRequest,
    responses(
        (status = 201, description = "Workspace created", body = WorkspaceResponse),
        (status = 400, description = "Invalid input or workspace limit reached", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(user_id = %request.user_id))]
pub async fn create_workspace(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CreateWorkspaceRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let workspace = state.workspaces.create(request).await?;
    Ok((StatusCode::CREATED, Json(WorkspaceResponse { workspace })))
}

#[utoipa::path(
    put,
    path = "/api/workspaces",
    tag = "workspaces",
    params(
        ("id" = Uuid, Query, description = "Workspace id"),
        ("userId" = Uuid, Query, description = "Owner user id")
    ),
    request_body = UpdateWorkspaceRequest,
    responses(
        (status = 200, description = "Workspace updated", body = WorkspaceResponse),
        (status = 400, description = "Not found or not owned by the user", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(workspace_id = %selector.id, user_id = %selector.user_id))]
pub async fn update_workspace(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(selector): ValidatedQuery<WorkspaceSelector>,
    ValidatedJson(request): ValidatedJson<UpdateWorkspaceRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let workspace = state
        .workspaces
        .update(selector.id, selector.user_id, request)
        .await?;
    Ok(Json(WorkspaceResponse { workspace }))
}

#[utoipa::path(
    delete,
    path = "/api/workspaces",
    tag = "workspaces",
    params(
        ("id" = Uuid, Query, description = "Workspace id"),
        ("userId" = Uuid, Query, description = "Owner user id")
    ),
    responses(
        (status = 200, description = "Workspace and its files deleted", body = MessageResponse),
        (status = 400, description = "Not found or not owned by the user", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(workspace_id = %selector.id, user_id = %selector.user_id))]
pub async fn delete_workspace(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(selector): ValidatedQuery<WorkspaceSelector>,
) -> Result<impl IntoResponse, HttpAppError> {
    let report = state
        .workspaces
        .delete(selector.id, selector.user_id)
        .await?;
    let message = if report.is_complete() {
        "Workspace deleted successfully".to_string()
    } else {
        // Record is gone either way; some objects may linger.
        "Workspace deleted; some stored files could not be removed".to_string()
    };
    Ok(Json(MessageResponse { message }))
}
