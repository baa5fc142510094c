//! Raffle API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::TestApp;

#[tokio::test]
async fn test_create_stores_description_as_prize() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/raffles")
        .json(&json!({"title": "Summer", "description": "A bicycle"}))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["message"], "Raffle created");
    assert_eq!(body["raffle"]["title"], "Summer");
    assert_eq!(body["raffle"]["prize"], "A bicycle");
}

#[tokio::test]
async fn test_create_accepts_body_larger_than_log_copy_limit() {
    let app = TestApp::new();
    let description = "x".repeat(1536 * 1024);

    let response = app
        .server
        .post("/raffles")
        .json(&json!({"title": "Large", "description": description}))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["raffle"]["prize"].as_str().unwrap().len(), description.len());
}

#[tokio::test]
async fn test_create_without_description_is_400() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/raffles")
        .json(&json!({"title": "Summer"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], 10007);
}

#[tokio::test]
async fn test_list_and_get_raffles() {
    let app = TestApp::new();
    let id = app.create_raffle("First").await;
    app.create_raffle("Second").await;

    let response = app.server.get("/raffles").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Vec<Value>>().len(), 2);

    let response = app.server.get(&format!("/raffles/{id}")).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["title"], "First");

    app.server
        .get("/raffles/9999")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_raffle_partially() {
    let app = TestApp::new();
    let id = app.create_raffle("Winter").await;

    let response = app
        .server
        .put(&format!("/raffles/{id}"))
        .json(&json!({"description": "A sled"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Raffle updated");
    assert_eq!(body["raffle"]["title"], "Winter");
    assert_eq!(body["raffle"]["prize"], "A sled");
}

#[tokio::test]
async fn test_delete_missing_raffle_is_404() {
    let app = TestApp::new();

    let response = app.server.delete("/raffles/77").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "Raffle not found");
}

#[tokio::test]
async fn test_delete_raffle() {
    let app = TestApp::new();
    let id = app.create_raffle("Gone").await;

    let response = app.server.delete(&format!("/raffles/{id}")).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["message"], "Raffle deleted");
    assert!(!app.raffles.exists(id as i32));
}
