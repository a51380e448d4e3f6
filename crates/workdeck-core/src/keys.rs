//! Blob key derivation.
//!
//! Object keys follow `users/{userId}/workspaces/{workspaceId}/projects/{projectId}/{fileName}`.
//! The prefix up to the file name is the tenancy boundary for blob storage:
//! there is no per-object ACL, only prefix containment, so every blob-facing
//! operation must verify the supplied key against the prefix derived from the
//! caller's ids.

use uuid::Uuid;

/// Prefix covering every object owned by a workspace (all projects included).
pub fn workspace_prefix(user_id: Uuid, workspace_id: Uuid) -> String {
    format!("users/{}/workspaces/{}/", user_id, workspace_id)
}

/// Prefix covering every object within a single project.
pub fn project_prefix(user_id: Uuid, workspace_id: Uuid, project_id: Uuid) -> String {
    format!(
        "users/{}/workspaces/{}/projects/{}/",
        user_id, workspace_id, project_id
    )
}

/// Full object key for a named file. Name-derived: uploading the same file
/// name twice overwrites at the blob layer (last write wins by name).
pub fn object_key(user_id: Uuid, workspace_id: Uuid, project_id: Uuid, file_name: &str) -> String {
    format!(
        "{}{}",
        project_prefix(user_id, workspace_id, project_id),
        file_name
    )
}

/// Derive the display name of an object by stripping the project prefix.
/// Returns the full key unchanged if it does not carry the prefix.
pub fn file_name_from_key<'a>(key: &'a str, prefix: &str) -> &'a str {
    key.strip_prefix(prefix).unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_key_nests_under_project_prefix() {
        let user = Uuid::new_v4();
        let ws = Uuid::new_v4();
        let proj = Uuid::new_v4();

        let key = object_key(user, ws, proj, "report.pdf");
        assert!(key.starts_with(&project_prefix(user, ws, proj)));
        assert!(key.starts_with(&workspace_prefix(user, ws)));
        assert!(key.ends_with("/report.pdf"));
    }

    #[test]
    fn project_prefix_is_workspace_scoped() {
        let user = Uuid::new_v4();
        let ws = Uuid::new_v4();
        let proj = Uuid::new_v4();

        let prefix = project_prefix(user, ws, proj);
        assert!(prefix.starts_with(&workspace_prefix(user, ws)));
        assert!(prefix.ends_with('/'));
    }

    #[test]
    fn file_name_strips_prefix() {
        let user = Uuid::new_v4();
        let ws = Uuid::new_v4();
        let proj = Uuid::new_v4();
        let prefix = project_prefix(user, ws, proj);

        let key = format!("{}notes.txt", prefix);
        assert_eq!(file_name_from_key(&key, &prefix), "notes.txt");
        // Foreign keys pass through untouched.
        assert_eq!(file_name_from_key("users/other/x.bin", &prefix), "users/other/x.bin");
    }
}
