//! HTTP-level tests through the assembled router.

mod helpers;

use axum::body::Body;
use helpers::{setup_test_app, TestApp};
use http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn send_json(
    app: &TestApp,
    method: &str,
    uri: &str,
    body: Value,
) -> (StatusCode, Value) {
    let response = app
        .router()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn send_get(app: &TestApp, uri: &str) -> (StatusCode, Value) {
    let response = app
        .router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn register(app: &TestApp, username: &str) -> Value {
    let (status, body) = send_json(
        app,
        "POST",
        "/api/auth/register",
        json!({ "username": username, "password": "password123" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["user"].clone()
}

#[tokio::test]
async fn health_endpoint_reports_backends() {
    let app = setup_test_app();
    let (status, body) = send_get(&app, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storageBackend"].as_str(), Some("memory"));
}

#[tokio::test]
async fn register_returns_created_user_without_hash() {
    let app = setup_test_app();
    let user = register(&app, "alice").await;

    assert_eq!(user["username"], "alice");
    assert!(user["id"].as_str().is_some());
    assert!(user.get("passwordHash").is_none());

    // Duplicate registration fails with the structured error shape.
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/auth/register",
        json!({ "username": "alice", "password": "password123" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
    assert!(body["error"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn login_with_bad_password_is_401() {
    let app = setup_test_app();
    register(&app, "alice").await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        json!({ "username": "alice", "password": "wrong" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_CREDENTIALS");
    assert_eq!(body["error"], "Invalid username or password");
}

#[tokio::test]
async fn workspace_create_list_delete_over_http() {
    let app = setup_test_app();
    let user = register(&app, "alice").await;
    let user_id = user["id"].as_str().unwrap().to_string();

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/workspaces",
        json!({ "name": "Research", "userId": user_id }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let workspace_id = body["workspace"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["workspace"]["name"], "Research");

    let (status, body) = send_get(&app, &format!("/api/workspaces?userId={}", user_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["workspaces"].as_array().unwrap().len(), 1);

    let response = app
        .router()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!(
                    "/api/workspaces?id={}&userId={}",
                    workspace_id, user_id
                ))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (_, body) = send_get(&app, &format!("/api/workspaces?userId={}", user_id)).await;
    assert!(body["workspaces"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn multipart_upload_then_list_and_download_url() {
    let app = setup_test_app();
    let user = register(&app, "alice").await;
    let user_id = user["id"].as_str().unwrap().to_string();

    let (_, body) = send_json(
        &app,
        "POST",
        "/api/workspaces",
        json!({ "name": "ws", "userId": user_id }),
    )
    .await;
    let workspace_id = body["workspace"]["id"].as_str().unwrap().to_string();

    let (_, body) = send_json(
        &app,
        "POST",
        "/api/projects",
        json!({ "name": "p", "workspaceId": workspace_id, "userId": user_id }),
    )
    .await;
    let project_id = body["project"]["id"].as_str().unwrap().to_string();

    let boundary = "X-WORKDECK-TEST-BOUNDARY";
    let mut form = Vec::new();
    for (name, value) in [
        ("userId", user_id.as_str()),
        ("workspaceId", workspace_id.as_str()),
        ("projectId", project_id.as_str()),
    ] {
        form.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                boundary, name, value
            )
            .as_bytes(),
        );
    }
    form.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"hello.txt\"\r\nContent-Type: text/plain\r\n\r\nhello world\r\n--{}--\r\n",
            boundary, boundary
        )
        .as_bytes(),
    );

    let response = app
        .router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/files/upload")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={}", boundary),
                )
                .body(Body::from(form))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["file"]["name"], "hello.txt");
    assert_eq!(body["file"]["size"], 11);
    let key = body["file"]["key"].as_str().unwrap().to_string();

    let (status, body) = send_get(
        &app,
        &format!(
            "/api/files?userId={}&workspaceId={}&projectId={}",
            user_id, workspace_id, project_id
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["files"].as_array().unwrap().len(), 1);

    let (status, body) = send_get(
        &app,
        &format!(
            "/api/files?userId={}&workspaceId={}&projectId={}&action=download&key={}",
            user_id, workspace_id, project_id, key
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["downloadUrl"].as_str().unwrap().contains("hello.txt"));
}

#[tokio::test]
async fn unknown_file_action_is_400() {
    let app = setup_test_app();
    let user = register(&app, "alice").await;
    let user_id = user["id"].as_str().unwrap();

    let (status, body) = send_get(
        &app,
        &format!(
            "/api/files?userId={}&workspaceId={}&projectId={}&action=explode",
            user_id,
            uuid::Uuid::new_v4(),
            uuid::Uuid::new_v4()
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn openapi_spec_is_served() {
    let app = setup_test_app();
    let (status, body) = send_get(&app, "/api/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/api/workspaces").is_some());
    assert!(body["paths"].get("/api/files/upload").is_some());
}

#[tokio::test]
async fn project_listing_requires_user_id_with_json_error() {
    let app = setup_test_app();
    let user = register(&app, "alice").await;
    let user_id = user["id"].as_str().unwrap().to_string();

    let (_, body) = send_json(
        &app,
        "POST",
        "/api/workspaces",
        json!({ "name": "ws", "userId": user_id }),
    )
    .await;
    let workspace_id = body["workspace"]["id"].as_str().unwrap().to_string();
    let (status, _) = send_json(
        &app,
        "POST",
        "/api/projects",
        json!({ "name": "p", "userId": user_id, "workspaceId": workspace_id }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Listing is owner-scoped: workspaceId alone is rejected, and the
    // rejection uses the structured error shape, not a plain-text body.
    let (status, body) =
        send_get(&app, &format!("/api/projects?workspaceId={}", workspace_id)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
    assert!(body["error"].as_str().unwrap().contains("query parameters"));

    let (status, body) = send_get(
        &app,
        &format!("/api/projects?userId={}&workspaceId={}", user_id, workspace_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["projects"].as_array().unwrap().len(), 1);
}
