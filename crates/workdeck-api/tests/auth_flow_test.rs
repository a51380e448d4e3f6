//! Registration and login behavior.

mod helpers;

use helpers::{register_user, setup_test_app, TEST_PASSWORD};
use workdeck_core::models::{LoginRequest, RegisterRequest};
use workdeck_core::AppError;

#[tokio::test]
async fn register_then_login_roundtrip() {
    let app = setup_test_app();
    let registered = register_user(&app.state, "alice").await;

    let logged_in = app
        .state
        .identity
        .authenticate(LoginRequest {
            username: "alice".to_string(),
            password: TEST_PASSWORD.to_string(),
        })
        .await
        .unwrap();

    assert_eq!(logged_in.id, registered.id);
    assert_eq!(logged_in.username, "alice");
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let app = setup_test_app();
    register_user(&app.state, "alice").await;

    let err = app
        .state
        .identity
        .register(RegisterRequest {
            username: "alice".to_string(),
            password: "another-password".to_string(),
            email: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidInput(_)));
    assert!(err.to_string().contains("already exists"));
    assert_eq!(app.documents.user_count().await, 1);
}

#[tokio::test]
async fn short_password_is_rejected() {
    let app = setup_test_app();
    let err = app
        .state
        .identity
        .register(RegisterRequest {
            username: "bob".to_string(),
            password: "12345".to_string(),
            email: None,
        })
        .await
        .unwrap_err();

    assert!(err.to_string().contains("at least 6 characters"));
}

#[tokio::test]
async fn wrong_password_and_unknown_user_are_indistinguishable() {
    let app = setup_test_app();
    register_user(&app.state, "alice").await;

    let wrong_password = app
        .state
        .identity
        .authenticate(LoginRequest {
            username: "alice".to_string(),
            password: "wrong-password".to_string(),
        })
        .await
        .unwrap_err();
    let unknown_user = app
        .state
        .identity
        .authenticate(LoginRequest {
            username: "nobody".to_string(),
            password: TEST_PASSWORD.to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(wrong_password, AppError::InvalidCredentials));
    assert!(matches!(unknown_user, AppError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_user.to_string());
}

#[tokio::test]
async fn lookup_by_id_finds_registered_user() {
    let app = setup_test_app();
    let registered = register_user(&app.state, "alice").await;

    let found = app.state.identity.get_user(registered.id).await.unwrap();
    assert_eq!(found.unwrap().username, "alice");

    let absent = app
        .state
        .identity
        .get_user(uuid::Uuid::new_v4())
        .await
        .unwrap();
    assert!(absent.is_none());
}

#[tokio::test]
async fn serialized_user_never_contains_password_hash() {
    let app = setup_test_app();
    let user = register_user(&app.state, "alice").await;

    let json = serde_json::to_value(&user).unwrap();
    assert!(json.get("passwordHash").is_none());
    assert!(json.get("password_hash").is_none());
    assert!(json.get("username").is_some());
}
