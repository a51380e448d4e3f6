//! End-to-end hierarchy flow through the service layer.

mod helpers;

use helpers::{create_project, create_workspace, register_user, setup_test_app, upload_file};
use workdeck_core::models::{UpdateProjectRequest, UpdateWorkspaceRequest};

#[tokio::test]
async fn full_lifecycle_register_to_cleanup() {
    let app = setup_test_app();

    // Register and set up a workspace with a project.
    let alice = register_user(&app.state, "alice").await;
    let ws = create_workspace(&app.state, alice.id, "Research").await;
    let project = create_project(&app.state, alice.id, ws.id, "Paper").await;
    assert_eq!(project.user_id, alice.id);
    assert_eq!(project.workspace_id, ws.id);

    // Upload and list.
    let file = upload_file(&app.state, alice.id, ws.id, project.id, "draft.md", b"# Draft").await;
    assert!(file.key.starts_with(&format!("users/{}/", alice.id)));
    assert!(file.key.ends_with("/draft.md"));

    let files = app
        .state
        .files
        .list(alice.id, ws.id, project.id)
        .await
        .unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].name, "draft.md");
    assert_eq!(files[0].size, 7);

    // Presigned download URL points at the derived key.
    let url = app
        .state
        .files
        .download_url(alice.id, ws.id, project.id, &file.key)
        .await
        .unwrap();
    assert!(url.contains(&file.key));

    // Stored metadata carries the ownership chain.
    let metadata = app.storage.object_metadata(&file.key).await.unwrap();
    assert_eq!(metadata.get("userId").unwrap(), &alice.id.to_string());
    assert_eq!(metadata.get("projectId").unwrap(), &project.id.to_string());
    assert_eq!(metadata.get("originalName").unwrap(), "draft.md");

    // Rename both levels.
    let ws = app
        .state
        .workspaces
        .update(
            ws.id,
            alice.id,
            UpdateWorkspaceRequest {
                name: Some("Research 2026".to_string()),
                description: Some("current".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(ws.name, "Research 2026");
    assert!(ws.updated_at >= ws.created_at);

    let project = app
        .state
        .projects
        .update(
            project.id,
            alice.id,
            UpdateProjectRequest {
                name: Some("Paper v2".to_string()),
                description: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(project.name, "Paper v2");

    // Tear down.
    app.state
        .files
        .delete(alice.id, ws.id, project.id, &file.key)
        .await
        .unwrap();
    assert!(app
        .state
        .files
        .list(alice.id, ws.id, project.id)
        .await
        .unwrap()
        .is_empty());

    app.state.projects.delete(project.id, alice.id).await.unwrap();
    app.state.workspaces.delete(ws.id, alice.id).await.unwrap();
    assert!(app.state.workspaces.list(alice.id).await.unwrap().is_empty());
    assert_eq!(app.storage.object_count().await, 0);
}

#[tokio::test]
async fn upload_url_yields_project_scoped_key() {
    let app = setup_test_app();
    let alice = register_user(&app.state, "alice").await;
    let ws = create_workspace(&app.state, alice.id, "ws").await;
    let project = create_project(&app.state, alice.id, ws.id, "p").await;

    let (url, key) = app
        .state
        .files
        .upload_url(alice.id, ws.id, project.id, "big.zip", "application/zip")
        .await
        .unwrap();

    assert!(key.starts_with(&format!("users/{}/workspaces/{}/", alice.id, ws.id)));
    assert!(key.ends_with("/big.zip"));
    assert!(url.contains("big.zip"));
}

#[tokio::test]
async fn same_file_name_overwrites_instead_of_duplicating() {
    let app = setup_test_app();
    let alice = register_user(&app.state, "alice").await;
    let ws = create_workspace(&app.state, alice.id, "ws").await;
    let project = create_project(&app.state, alice.id, ws.id, "p").await;

    upload_file(&app.state, alice.id, ws.id, project.id, "notes.txt", b"first").await;
    let second = upload_file(&app.state, alice.id, ws.id, project.id, "notes.txt", b"second").await;

    let files = app
        .state
        .files
        .list(alice.id, ws.id, project.id)
        .await
        .unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(
        app.storage.object_bytes(&second.key).await.unwrap().as_ref(),
        b"second"
    );
}
