//! Test helpers: build AppState and router against in-memory backends.
//!
//! Run from workspace root: `cargo test -p workdeck-api`.

#![allow(dead_code)]

use std::sync::Arc;
use uuid::Uuid;
use workdeck_api::setup::{build_state, routes};
use workdeck_api::state::AppState;
use workdeck_core::models::{
    CreateProjectRequest, CreateWorkspaceRequest, FileItem, Project, RegisterRequest, User,
    Workspace,
};
use workdeck_core::Config;
use workdeck_db::MemoryStore;
use workdeck_storage::MemoryStorage;

pub const TEST_PASSWORD: &str = "password123";

/// Test application with handles on the raw in-memory stores for assertions.
pub struct TestApp {
    pub state: Arc<AppState>,
    pub documents: Arc<MemoryStore>,
    pub storage: Arc<MemoryStorage>,
}

impl TestApp {
    pub fn router(&self) -> axum::Router {
        routes::build_router(&self.state.config, self.state.clone())
    }
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with_page_size(1000)
}

/// Small listing pages make cascade pagination observable.
pub fn setup_test_app_with_page_size(page_size: usize) -> TestApp {
    let documents = Arc::new(MemoryStore::new());
    let storage = Arc::new(MemoryStorage::with_page_size(page_size));
    let state = build_state(Config::for_tests(), documents.clone(), storage.clone());
    TestApp {
        state,
        documents,
        storage,
    }
}

pub async fn register_user(state: &AppState, username: &str) -> User {
    state
        .identity
        .register(RegisterRequest {
            username: username.to_string(),
            password: TEST_PASSWORD.to_string(),
            email: None,
        })
        .await
        .expect("register user")
}

pub async fn create_workspace(state: &AppState, user_id: Uuid, name: &str) -> Workspace {
    state
        .workspaces
        .create(CreateWorkspaceRequest {
            name: name.to_string(),
            description: None,
            user_id,
        })
        .await
        .expect("create workspace")
}

pub async fn create_project(
    state: &AppState,
    user_id: Uuid,
    workspace_id: Uuid,
    name: &str,
) -> Project {
    state
        .projects
        .create(CreateProjectRequest {
            name: name.to_string(),
            description: None,
            workspace_id,
            user_id,
        })
        .await
        .expect("create project")
}

pub async fn upload_file(
    state: &AppState,
    user_id: Uuid,
    workspace_id: Uuid,
    project_id: Uuid,
    name: &str,
    data: &[u8],
) -> FileItem {
    state
        .files
        .upload(
            user_id,
            workspace_id,
            project_id,
            name,
            "application/octet-stream",
            data.to_vec(),
        )
        .await
        .expect("upload file")
}
