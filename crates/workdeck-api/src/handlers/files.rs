use crate::error::{ErrorResponse, HttpAppError, ValidatedQuery};
use crate::handlers::workspaces::MessageResponse;
use crate::state::AppState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;
use workdeck_core::models::FileItem;
use workdeck_core::AppError;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilesQuery {
    pub user_id: Uuid,
    pub workspace_id: Uuid,
    pub project_id: Uuid,
    /// `download` or `upload-url`; absent means "list".
    pub action: Option<String>,
    pub key: Option<String>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSelector {
    pub user_id: Uuid,
    pub workspace_id: Uuid,
    pub project_id: Uuid,
    pub key: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FilesResponse {
    pub files: Vec<FileItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FileResponse {
    pub file: FileItem,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DownloadUrlResponse {
    pub download_url: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlResponse {
    pub upload_url: String,
    pub key: String,
}

/// One endpoint, three read operations, selected by `action`: plain listing,
/// presigned download URL, presigned upload URL.
#[utoipa::path(
    get,
    path = "/api/files",
    tag = "files",
    params(
        ("userId" = Uuid, Query, description = "Owner user id"),
        ("workspaceId" = Uuid, Query, description = "Workspace id"),
        ("projectId" = Uuid, Query, description = "Project id"),
        ("action" = Option<String>, Query, description = "Omit to list; 'download' for a download URL; 'upload-url' for a direct-upload URL"),
        ("key" = Option<String>, Query, description = "Object key, required for action=download"),
        ("fileName" = Option<String>, Query, description = "File name, required for action=upload-url"),
        ("contentType" = Option<String>, Query, description = "Content type for action=upload-url")
    ),
    responses(
        (status = 200, description = "Listing or presigned URL", body = FilesResponse),
        (status = 400, description = "Invalid parameters or scope not owned by the user", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(user_id = %query.user_id, project_id = %query.project_id, action = ?query.action))]
pub async fn get_files(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(query): ValidatedQuery<FilesQuery>,
) -> Result<axum::response::Response, HttpAppError> {
    match query.action.as_deref() {
        None => {
            let files = state
                .files
                .list(query.user_id, query.workspace_id, query.project_id)
                .await?;
            Ok(Json(FilesResponse { files }).into_response())
        }
        Some("download") => {
            let key = query.key.ok_or_else(|| {
                AppError::InvalidInput("Key parameter is required for download".to_string())
            })?;
            let download_url = state
                .files
                .download_url(query.user_id, query.workspace_id, query.project_id, &key)
                .await?;
            Ok(Json(DownloadUrlResponse { download_url }).into_response())
        }
        Some("upload-url") => {
            let file_name = query.file_name.ok_or_else(|| {
                AppError::InvalidInput("FileName parameter is required for upload-url".to_string())
            })?;
            let content_type = query
                .content_type
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
            let (upload_url, key) = state
                .files
                .upload_url(
                    query.user_id,
                    query.workspace_id,
                    query.project_id,
                    &file_name,
                    &content_type,
                )
                .await?;
            Ok(Json(UploadUrlResponse { upload_url, key }).into_response())
        }
        Some(other) => Err(HttpAppError(AppError::InvalidInput(format!(
            "Unknown action '{}'",
            other
        )))),
    }
}

#[utoipa::path(
    post,
    path = "/api/files/upload",
    tag = "files",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "File stored", body = FileResponse),
        (status = 400, description = "Invalid input, file too large, or file limit reached", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart))]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let mut file_name = None;
    let mut content_type = None;
    let mut data = None;
    let mut user_id = None;
    let mut workspace_id = None;
    let mut project_id = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        HttpAppError(AppError::InvalidInput(format!(
            "Invalid multipart body: {}",
            e
        )))
    })? {
        match field.name() {
            Some("file") => {
                file_name = field.file_name().map(|s| s.to_string());
                content_type = field.content_type().map(|s| s.to_string());
                let bytes = field.bytes().await.map_err(|e| {
                    HttpAppError(AppError::InvalidInput(format!(
                        "Failed to read file field: {}",
                        e
                    )))
                })?;
                data = Some(bytes.to_vec());
            }
            Some("userId") => user_id = Some(read_uuid_field(field, "userId").await?),
            Some("workspaceId") => workspace_id = Some(read_uuid_field(field, "workspaceId").await?),
            Some("projectId") => project_id = Some(read_uuid_field(field, "projectId").await?),
            _ => {}
        }
    }

    let data = data.ok_or_else(|| AppError::InvalidInput("File field is required".to_string()))?;
    let file_name =
        file_name.ok_or_else(|| AppError::InvalidInput("File name is required".to_string()))?;
    let user_id =
        user_id.ok_or_else(|| AppError::InvalidInput("UserId field is required".to_string()))?;
    let workspace_id = workspace_id
        .ok_or_else(|| AppError::InvalidInput("WorkspaceId field is required".to_string()))?;
    let project_id = project_id
        .ok_or_else(|| AppError::InvalidInput("ProjectId field is required".to_string()))?;
    let content_type = content_type.unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

    let file = state
        .files
        .upload(
            user_id,
            workspace_id,
            project_id,
            &file_name,
            &content_type,
            data,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(FileResponse { file })))
}

async fn read_uuid_field(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<Uuid, HttpAppError> {
    let text = field.text().await.map_err(|e| {
        HttpAppError(AppError::InvalidInput(format!(
            "Failed to read {} field: {}",
            name, e
        )))
    })?;
    text.trim()
        .parse()
        .map_err(|_| HttpAppError(AppError::InvalidInput(format!("Invalid {} value", name))))
}

#[utoipa::path(
    delete,
    path = "/api/files",
    tag = "files",
    params(
        ("userId" = Uuid, Query, description = "Owner user id"),
        ("workspaceId" = Uuid, Query, description = "Workspace id"),
        ("projectId" = Uuid, Query, description = "Project id"),
        ("key" = String, Query, description = "Object key to delete")
    ),
    responses(
        (status = 200, description = "File deleted", body = MessageResponse),
        (status = 400, description = "Key outside the caller's project or scope not owned", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(user_id = %selector.user_id, project_id = %selector.project_id))]
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(selector): ValidatedQuery<FileSelector>,
) -> Result<impl IntoResponse, HttpAppError> {
    state
        .files
        .delete(
            selector.user_id,
            selector.workspace_id,
            selector.project_id,
            &selector.key,
        )
        .await?;
    Ok(Json(MessageResponse {
        message: "File deleted successfully".to_string(),
    }))
}
