//! Superadmin bootstrap against the in-memory user store

use pretty_assertions::assert_eq;

use raffle_api::bootstrap::{ensure_superadmin, SuperadminOutcome};
use raffle_api::config::SuperadminSettings;
use raffle_api::domain::UserRepository;

use crate::common::{InMemoryUsers, TestApp};

fn settings() -> SuperadminSettings {
    SuperadminSettings {
        email: "rifa@megarifasapp.com".into(),
        name: "Super Admin".into(),
        role: "superadmin".into(),
        password: Some("bootstrap-secret".into()),
    }
}

#[tokio::test]
async fn test_bootstrap_is_idempotent() {
    let users = InMemoryUsers::with_role_column();

    let first = ensure_superadmin(&users, &settings()).await.unwrap();
    let second = ensure_superadmin(&users, &settings()).await.unwrap();

    assert_eq!(first, SuperadminOutcome::Created { with_role: true });
    assert_eq!(second, SuperadminOutcome::AlreadyExists);
    assert_eq!(users.count_by_email("rifa@megarifasapp.com"), 1);

    let admin = users
        .find_by_email("rifa@megarifasapp.com")
        .await
        .unwrap()
        .unwrap();
    assert!(admin.has_role("superadmin"));
}

#[tokio::test]
async fn test_bootstrap_without_role_column() {
    let users = InMemoryUsers::default();

    let outcome = ensure_superadmin(&users, &settings()).await.unwrap();

    assert_eq!(outcome, SuperadminOutcome::Created { with_role: false });
    let admin = users
        .find_by_email("rifa@megarifasapp.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(admin.role, None);
}

#[tokio::test]
async fn test_superadmin_can_log_in() {
    let app = TestApp::new();
    ensure_superadmin(app.users.as_ref(), &settings()).await.unwrap();

    app.server
        .post("/login")
        .json(&serde_json::json!({
            "email": "rifa@megarifasapp.com",
            "password": "bootstrap-secret"
        }))
        .await
        .assert_status_ok();
}
