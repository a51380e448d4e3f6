//! Cross-tenant access attempts must fail without revealing existence.

mod helpers;

use helpers::{create_project, create_workspace, register_user, setup_test_app, upload_file};
use uuid::Uuid;
use workdeck_core::models::UpdateWorkspaceRequest;
use workdeck_core::AppError;

#[tokio::test]
async fn foreign_workspace_is_invisible() {
    let app = setup_test_app();
    let alice = register_user(&app.state, "alice").await;
    let bob = register_user(&app.state, "bob").await;
    let ws = create_workspace(&app.state, alice.id, "alices").await;

    let as_bob = app.state.workspaces.get(ws.id, bob.id).await.unwrap_err();
    let missing = app
        .state
        .workspaces
        .get(Uuid::new_v4(), bob.id)
        .await
        .unwrap_err();

    // Same error whether the workspace exists under another owner or not.
    assert!(matches!(as_bob, AppError::NotFoundOrForbidden(_)));
    assert_eq!(as_bob.to_string(), missing.to_string());
}

#[tokio::test]
async fn foreign_workspace_cannot_be_updated_or_deleted() {
    let app = setup_test_app();
    let alice = register_user(&app.state, "alice").await;
    let bob = register_user(&app.state, "bob").await;
    let ws = create_workspace(&app.state, alice.id, "alices").await;

    let update = app
        .state
        .workspaces
        .update(
            ws.id,
            bob.id,
            UpdateWorkspaceRequest {
                name: Some("hijacked".to_string()),
                description: None,
            },
        )
        .await;
    assert!(update.is_err());

    let delete = app.state.workspaces.delete(ws.id, bob.id).await;
    assert!(delete.is_err());

    // Untouched.
    let still = app.state.workspaces.get(ws.id, alice.id).await.unwrap();
    assert_eq!(still.name, "alices");
}

#[tokio::test]
async fn project_listing_requires_workspace_ownership() {
    let app = setup_test_app();
    let alice = register_user(&app.state, "alice").await;
    let bob = register_user(&app.state, "bob").await;
    let ws = create_workspace(&app.state, alice.id, "alices").await;
    create_project(&app.state, alice.id, ws.id, "p").await;

    let err = app
        .state
        .projects
        .list_by_workspace(ws.id, bob.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFoundOrForbidden(_)));
}

#[tokio::test]
async fn files_of_a_foreign_project_are_unreachable() {
    let app = setup_test_app();
    let alice = register_user(&app.state, "alice").await;
    let bob = register_user(&app.state, "bob").await;
    let ws = create_workspace(&app.state, alice.id, "alices").await;
    let project = create_project(&app.state, alice.id, ws.id, "p").await;
    let file = upload_file(&app.state, alice.id, ws.id, project.id, "secret.txt", b"s").await;

    let list = app.state.files.list(bob.id, ws.id, project.id).await;
    assert!(list.is_err());

    let url = app
        .state
        .files
        .download_url(bob.id, ws.id, project.id, &file.key)
        .await;
    assert!(url.is_err());
}

#[tokio::test]
async fn download_url_rejects_keys_outside_the_project_prefix() {
    let app = setup_test_app();
    let alice = register_user(&app.state, "alice").await;
    let bob = register_user(&app.state, "bob").await;

    let alice_ws = create_workspace(&app.state, alice.id, "aw").await;
    let alice_project = create_project(&app.state, alice.id, alice_ws.id, "ap").await;
    let alice_file =
        upload_file(&app.state, alice.id, alice_ws.id, alice_project.id, "a.txt", b"a").await;

    let bob_ws = create_workspace(&app.state, bob.id, "bw").await;
    let bob_project = create_project(&app.state, bob.id, bob_ws.id, "bp").await;

    // Bob authorizes against his own project but supplies Alice's key.
    let err = app
        .state
        .files
        .download_url(bob.id, bob_ws.id, bob_project.id, &alice_file.key)
        .await
        .unwrap_err();
    match err {
        AppError::NotFoundOrForbidden(msg) => assert!(msg.contains("invalid file key")),
        other => panic!("Expected NotFoundOrForbidden, got {:?}", other),
    }

    // Same rule for deletion: the object survives.
    let del = app
        .state
        .files
        .delete(bob.id, bob_ws.id, bob_project.id, &alice_file.key)
        .await;
    assert!(del.is_err());
    assert!(app.storage.object_bytes(&alice_file.key).await.is_some());
}

#[tokio::test]
async fn project_id_under_wrong_workspace_is_rejected() {
    let app = setup_test_app();
    let alice = register_user(&app.state, "alice").await;
    let ws1 = create_workspace(&app.state, alice.id, "w1").await;
    let ws2 = create_workspace(&app.state, alice.id, "w2").await;
    let project = create_project(&app.state, alice.id, ws1.id, "p").await;

    // Real project, real owner, wrong workspace in the path.
    let err = app
        .state
        .files
        .list(alice.id, ws2.id, project.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFoundOrForbidden(_)));
}
