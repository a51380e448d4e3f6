//! Project file operations against blob storage.
//!
//! There is no file record in the document store: the blob listing under the
//! project prefix is the source of truth for what files exist. Every
//! operation first authorizes the (user, workspace, project) scope, and any
//! client-supplied key is additionally checked for prefix containment —
//! that prefix is the tenancy boundary at the blob layer.

use crate::services::authz::authorize_project_scope;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use workdeck_core::constants::{
    FILES_PER_PROJECT, MAX_FILE_SIZE_BYTES, MAX_FILE_SIZE_MB, PRESIGNED_URL_EXPIRY_SECS,
};
use workdeck_core::keys;
use workdeck_core::models::{FileItem, Project};
use workdeck_core::AppError;
use workdeck_db::DocumentStore;
use workdeck_storage::{BlobStorage, ObjectInfo};

/// Scope of one file operation, resolved and authorized.
struct FileScope {
    project: Project,
    prefix: String,
}

#[derive(Clone)]
pub struct FileService {
    documents: Arc<dyn DocumentStore>,
    storage: Arc<dyn BlobStorage>,
}

impl FileService {
    pub fn new(documents: Arc<dyn DocumentStore>, storage: Arc<dyn BlobStorage>) -> Self {
        FileService { documents, storage }
    }

    async fn resolve_scope(
        &self,
        caller: Uuid,
        workspace_id: Uuid,
        project_id: Uuid,
    ) -> Result<FileScope, AppError> {
        let project = self.documents.get_project(project_id).await?;
        let project = authorize_project_scope(project, caller, workspace_id)?;
        let prefix = keys::project_prefix(project.user_id, project.workspace_id, project.id);
        Ok(FileScope { project, prefix })
    }

    /// Store a file in the project. Same file name overwrites the existing
    /// object; an overwrite does not count against the file cap.
    pub async fn upload(
        &self,
        caller: Uuid,
        workspace_id: Uuid,
        project_id: Uuid,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<FileItem, AppError> {
        let scope = self
            .resolve_scope(caller, workspace_id, project_id)
            .await?;
        validate_file_name(file_name)?;

        if data.len() > MAX_FILE_SIZE_BYTES {
            return Err(AppError::PayloadTooLarge(format!(
                "File size exceeds {} MB limit",
                MAX_FILE_SIZE_MB
            )));
        }

        let key = keys::object_key(
            scope.project.user_id,
            scope.project.workspace_id,
            scope.project.id,
            file_name,
        );

        // Read-then-write cap: count what's there, skip the check when the
        // name already exists (that upload replaces, it doesn't add).
        let existing = self.list_all(&scope.prefix).await?;
        let replacing = existing.iter().any(|o| o.key == key);
        if !replacing && existing.len() >= FILES_PER_PROJECT {
            return Err(AppError::LimitReached {
                resource: "file",
                limit: FILES_PER_PROJECT,
            });
        }

        let size = data.len() as i64;
        let metadata = HashMap::from([
            ("originalName".to_string(), file_name.to_string()),
            ("userId".to_string(), scope.project.user_id.to_string()),
            (
                "workspaceId".to_string(),
                scope.project.workspace_id.to_string(),
            ),
            ("projectId".to_string(), scope.project.id.to_string()),
        ]);
        self.storage
            .put_object(&key, data, content_type, metadata)
            .await?;

        tracing::info!(key = %key, size_bytes = size, replacing, "File uploaded");
        Ok(FileItem {
            key,
            name: file_name.to_string(),
            size,
            last_modified: Utc::now(),
            project_id: scope.project.id,
            workspace_id: scope.project.workspace_id,
            user_id: scope.project.user_id,
        })
    }

    /// List every file in the project, walking all listing pages.
    pub async fn list(
        &self,
        caller: Uuid,
        workspace_id: Uuid,
        project_id: Uuid,
    ) -> Result<Vec<FileItem>, AppError> {
        let scope = self
            .resolve_scope(caller, workspace_id, project_id)
            .await?;
        let objects = self.list_all(&scope.prefix).await?;

        Ok(objects
            .into_iter()
            .map(|o| {
                let name = keys::file_name_from_key(&o.key, &scope.prefix).to_string();
                FileItem {
                    key: o.key,
                    name,
                    size: o.size,
                    last_modified: o.last_modified,
                    project_id: scope.project.id,
                    workspace_id: scope.project.workspace_id,
                    user_id: scope.project.user_id,
                }
            })
            .collect())
    }

    /// Presigned GET URL for a file the caller owns. The key must sit inside
    /// the authorized project prefix; anything else is rejected without
    /// revealing whether it exists.
    pub async fn download_url(
        &self,
        caller: Uuid,
        workspace_id: Uuid,
        project_id: Uuid,
        key: &str,
    ) -> Result<String, AppError> {
        let scope = self
            .resolve_scope(caller, workspace_id, project_id)
            .await?;
        self.check_key_in_scope(key, &scope)?;

        let url = self
            .storage
            .presign_get(key, Duration::from_secs(PRESIGNED_URL_EXPIRY_SECS))
            .await?;
        Ok(url)
    }

    /// Presigned PUT URL so clients can upload directly to the blob store.
    /// The cap is checked here, but a direct upload bypasses the size check —
    /// the URL is scoped to a single derived key, nothing else.
    pub async fn upload_url(
        &self,
        caller: Uuid,
        workspace_id: Uuid,
        project_id: Uuid,
        file_name: &str,
        content_type: &str,
    ) -> Result<(String, String), AppError> {
        let scope = self
            .resolve_scope(caller, workspace_id, project_id)
            .await?;
        validate_file_name(file_name)?;

        let key = keys::object_key(
            scope.project.user_id,
            scope.project.workspace_id,
            scope.project.id,
            file_name,
        );

        let existing = self.list_all(&scope.prefix).await?;
        let replacing = existing.iter().any(|o| o.key == key);
        if !replacing && existing.len() >= FILES_PER_PROJECT {
            return Err(AppError::LimitReached {
                resource: "file",
                limit: FILES_PER_PROJECT,
            });
        }

        let url = self
            .storage
            .presign_put(
                &key,
                content_type,
                Duration::from_secs(PRESIGNED_URL_EXPIRY_SECS),
            )
            .await?;
        Ok((url, key))
    }

    /// Delete one file by key.
    pub async fn delete(
        &self,
        caller: Uuid,
        workspace_id: Uuid,
        project_id: Uuid,
        key: &str,
    ) -> Result<(), AppError> {
        let scope = self
            .resolve_scope(caller, workspace_id, project_id)
            .await?;
        self.check_key_in_scope(key, &scope)?;

        self.storage.delete_object(key).await?;
        tracing::info!(key = %key, "File deleted");
        Ok(())
    }

    fn check_key_in_scope(&self, key: &str, scope: &FileScope) -> Result<(), AppError> {
        if !key.starts_with(&scope.prefix) {
            return Err(AppError::NotFoundOrForbidden(
                "Access denied: invalid file key".to_string(),
            ));
        }
        Ok(())
    }

    async fn list_all(&self, prefix: &str) -> Result<Vec<ObjectInfo>, AppError> {
        let mut objects = Vec::new();
        let mut continuation = None;
        loop {
            let page = self.storage.list_page(prefix, continuation).await?;
            objects.extend(page.objects);
            match page.next_token {
                Some(token) => continuation = Some(token),
                None => break,
            }
        }
        Ok(objects)
    }
}

/// File names become the final key segment; reject anything that would
/// change the key's nesting or escape the prefix.
fn validate_file_name(file_name: &str) -> Result<(), AppError> {
    if file_name.trim().is_empty() {
        return Err(AppError::InvalidInput("File name is required".to_string()));
    }
    if file_name.contains('/') || file_name.contains('\\') || file_name.contains("..") {
        return Err(AppError::InvalidInput(
            "File name must not contain path separators".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_with_separators_are_rejected() {
        assert!(validate_file_name("report.pdf").is_ok());
        assert!(validate_file_name("a/b.txt").is_err());
        assert!(validate_file_name("a\\b.txt").is_err());
        assert!(validate_file_name("..secret").is_err());
        assert!(validate_file_name("  ").is_err());
    }
}
