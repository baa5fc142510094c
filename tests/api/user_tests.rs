//! User API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{unique_email, TestApp};

#[tokio::test]
async fn test_list_and_get_users() {
    let app = TestApp::new();
    let email = unique_email();
    let user = app.register(&email, "pw123").await;
    let id = user["id"].as_i64().unwrap();

    let response = app.server.get("/users").await;
    response.assert_status_ok();
    let users: Vec<Value> = response.json();
    assert_eq!(users.len(), 1);
    assert!(users[0].get("passwordHash").is_none());

    let response = app.server.get(&format!("/users/{id}")).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["email"], email.as_str());
}

#[tokio::test]
async fn test_get_missing_user_is_404() {
    let app = TestApp::new();

    let response = app.server.get("/users/999").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "User not found");
}

#[tokio::test]
async fn test_non_numeric_id_is_400() {
    let app = TestApp::new();

    let response = app.server.get("/users/abc").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "Invalid user ID");
}

#[tokio::test]
async fn test_create_user_hashes_password() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/users")
        .json(&json!({"email": "b@x.com", "name": "B", "password": "secret"}))
        .await;
    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["message"], "User created");

    // The stored credential works for login
    app.server
        .post("/login")
        .json(&json!({"email": "b@x.com", "password": "secret"}))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_update_user_changes_only_given_fields() {
    let app = TestApp::new();
    let user = app.register("c@x.com", "pw123").await;
    let id = user["id"].as_i64().unwrap();

    let response = app
        .server
        .put(&format!("/users/{id}"))
        .json(&json!({"name": "Renamed"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "User updated");
    assert_eq!(body["user"]["name"], "Renamed");
    assert_eq!(body["user"]["email"], "c@x.com");
}

#[tokio::test]
async fn test_update_missing_user_is_404() {
    let app = TestApp::new();

    let response = app
        .server
        .put("/users/42")
        .json(&json!({"name": "Nobody"}))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_user() {
    let app = TestApp::new();
    let user = app.register("d@x.com", "pw123").await;
    let id = user["id"].as_i64().unwrap();

    let response = app.server.delete(&format!("/users/{id}")).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["message"], "User deleted");

    app.server
        .delete(&format!("/users/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
