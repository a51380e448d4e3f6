//! Ownership checks.
//!
//! Every entity in the hierarchy carries its owner's id, and every operation
//! receives the caller's id. The check is a plain equality test; its one
//! subtlety is the error: an entity that is absent and an entity owned by
//! someone else produce the *same* response, so callers cannot probe for
//! other tenants' ids.

use uuid::Uuid;
use workdeck_core::models::{Project, Workspace};
use workdeck_core::AppError;

/// Implemented by entities that have a single owning user.
pub trait Owned {
    fn owner_id(&self) -> Uuid;
}

impl Owned for Workspace {
    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

impl Owned for Project {
    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

/// Resolve a lookup result into the entity, or the collapsed
/// not-found-or-forbidden error. `what` names the entity kind for the
/// client message ("Workspace", "Project").
pub fn authorize<T: Owned>(entity: Option<T>, caller: Uuid, what: &str) -> Result<T, AppError> {
    match entity {
        Some(entity) if entity.owner_id() == caller => Ok(entity),
        _ => Err(AppError::NotFoundOrForbidden(format!(
            "{} not found or access denied",
            what
        ))),
    }
}

/// Like [`authorize`], additionally requiring the project to sit inside the
/// workspace the caller claims. A real project id under the wrong workspace
/// is indistinguishable from a missing one.
pub fn authorize_project_scope(
    project: Option<Project>,
    caller: Uuid,
    workspace_id: Uuid,
) -> Result<Project, AppError> {
    let project = authorize(project, caller, "Project")?;
    if project.workspace_id != workspace_id {
        return Err(AppError::NotFoundOrForbidden(
            "Project not found or access denied".to_string(),
        ));
    }
    Ok(project)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn workspace(owner: Uuid) -> Workspace {
        Workspace {
            id: Uuid::new_v4(),
            name: "w".to_string(),
            description: None,
            user_id: owner,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn project(owner: Uuid, workspace_id: Uuid) -> Project {
        Project {
            id: Uuid::new_v4(),
            name: "p".to_string(),
            description: None,
            workspace_id,
            user_id: owner,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn owner_passes() {
        let owner = Uuid::new_v4();
        assert!(authorize(Some(workspace(owner)), owner, "Workspace").is_ok());
    }

    #[test]
    fn missing_and_foreign_yield_identical_errors() {
        let caller = Uuid::new_v4();
        let missing = authorize::<Workspace>(None, caller, "Workspace").unwrap_err();
        let foreign =
            authorize(Some(workspace(Uuid::new_v4())), caller, "Workspace").unwrap_err();
        assert_eq!(missing.to_string(), foreign.to_string());
    }

    #[test]
    fn project_scope_requires_matching_workspace() {
        let owner = Uuid::new_v4();
        let ws = Uuid::new_v4();
        let p = project(owner, ws);

        assert!(authorize_project_scope(Some(p.clone()), owner, ws).is_ok());
        assert!(authorize_project_scope(Some(p), owner, Uuid::new_v4()).is_err());
    }
}
