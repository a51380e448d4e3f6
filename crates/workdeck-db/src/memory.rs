//! In-memory document store.
//!
//! Same observable semantics as the DynamoDB backend: single-record
//! operations, whole-record overwrites, unordered index lookups. Used by
//! tests and for local development without AWS credentials.

use crate::traits::{DocumentResult, DocumentStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;
use workdeck_core::models::{Project, User, Workspace};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    workspaces: HashMap<Uuid, Workspace>,
    projects: HashMap<Uuid, Project>,
}

/// Memory document store implementation.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored user records, for test assertions.
    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }

    /// Number of stored project records, for test assertions.
    pub async fn project_count(&self) -> usize {
        self.tables.read().await.projects.len()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn put_user(&self, user: &User) -> DocumentResult<()> {
        self.tables.write().await.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn get_user(&self, id: Uuid) -> DocumentResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> DocumentResult<Option<User>> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn put_workspace(&self, workspace: &Workspace) -> DocumentResult<()> {
        self.tables
            .write()
            .await
            .workspaces
            .insert(workspace.id, workspace.clone());
        Ok(())
    }

    async fn get_workspace(&self, id: Uuid) -> DocumentResult<Option<Workspace>> {
        Ok(self.tables.read().await.workspaces.get(&id).cloned())
    }

    async fn list_workspaces_by_owner(&self, owner_id: Uuid) -> DocumentResult<Vec<Workspace>> {
        Ok(self
            .tables
            .read()
            .await
            .workspaces
            .values()
            .filter(|w| w.user_id == owner_id)
            .cloned()
            .collect())
    }

    async fn delete_workspace(&self, id: Uuid) -> DocumentResult<()> {
        self.tables.write().await.workspaces.remove(&id);
        Ok(())
    }

    async fn put_project(&self, project: &Project) -> DocumentResult<()> {
        self.tables
            .write()
            .await
            .projects
            .insert(project.id, project.clone());
        Ok(())
    }

    async fn get_project(&self, id: Uuid) -> DocumentResult<Option<Project>> {
        Ok(self.tables.read().await.projects.get(&id).cloned())
    }

    async fn list_projects_by_workspace(
        &self,
        workspace_id: Uuid,
    ) -> DocumentResult<Vec<Project>> {
        Ok(self
            .tables
            .read()
            .await
            .projects
            .values()
            .filter(|p| p.workspace_id == workspace_id)
            .cloned()
            .collect())
    }

    async fn list_projects_by_owner(&self, owner_id: Uuid) -> DocumentResult<Vec<Project>> {
        Ok(self
            .tables
            .read()
            .await
            .projects
            .values()
            .filter(|p| p.user_id == owner_id)
            .cloned()
            .collect())
    }

    async fn delete_project(&self, id: Uuid) -> DocumentResult<()> {
        self.tables.write().await.projects.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn workspace(owner: Uuid, name: &str) -> Workspace {
        Workspace {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            user_id: owner,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn username_lookup_is_exact() {
        let store = MemoryStore::new();
        let user = User {
            id: Uuid::new_v4(),
            username: "Alice".to_string(),
            password_hash: "h".to_string(),
            email: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        store.put_user(&user).await.unwrap();

        assert!(store.get_user_by_username("Alice").await.unwrap().is_some());
        assert!(store.get_user_by_username("alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn owner_listing_filters_other_owners() {
        let store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        store.put_workspace(&workspace(alice, "a1")).await.unwrap();
        store.put_workspace(&workspace(alice, "a2")).await.unwrap();
        store.put_workspace(&workspace(bob, "b1")).await.unwrap();

        let listed = store.list_workspaces_by_owner(alice).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|w| w.user_id == alice));
    }

    #[tokio::test]
    async fn put_overwrites_whole_record() {
        let store = MemoryStore::new();
        let mut ws = workspace(Uuid::new_v4(), "before");
        store.put_workspace(&ws).await.unwrap();

        ws.name = "after".to_string();
        ws.description = Some("renamed".to_string());
        store.put_workspace(&ws).await.unwrap();

        let stored = store.get_workspace(ws.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "after");
        assert_eq!(stored.description.as_deref(), Some("renamed"));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryStore::new();
        let ws = workspace(Uuid::new_v4(), "w");
        store.put_workspace(&ws).await.unwrap();
        store.delete_workspace(ws.id).await.unwrap();
        store.delete_workspace(ws.id).await.unwrap();
        assert!(store.get_workspace(ws.id).await.unwrap().is_none());
    }
}
