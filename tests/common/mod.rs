//! Common Test Utilities
//!
//! In-memory stores behind the repository traits, and a `TestApp` that serves
//! the real router on top of them.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use fake::{faker::internet::en::SafeEmail, Fake};
use serde_json::{json, Value};

use raffle_api::application::services::TokenIssuer;
use raffle_api::domain::{
    DatabaseProbe, NewRaffle, NewTicket, NewUser, Raffle, RaffleChanges, RaffleRepository, Ticket,
    TicketRepository, User, UserChanges, UserRepository,
};
use raffle_api::presentation::http::create_router;
use raffle_api::shared::error::AppError;
use raffle_api::startup::AppState;

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// What the database reports for a unique or foreign key violation.
fn constraint_violation(detail: &str) -> AppError {
    AppError::Database(sqlx::Error::Protocol(detail.to_string()))
}

/// SERIAL-like id source; ids are never reused after a delete.
#[derive(Default)]
struct Sequence(AtomicI32);

impl Sequence {
    fn next(&self) -> i32 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }
}

#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<Vec<User>>,
    ids: Sequence,
    has_role_column: bool,
}

impl InMemoryUsers {
    pub fn with_role_column() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            ids: Sequence::default(),
            has_role_column: true,
        }
    }

    pub fn count_by_email(&self, email: &str) -> usize {
        self.rows.lock().unwrap().iter().filter(|u| u.email == email).count()
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, AppError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.email == user.email) {
            return Err(constraint_violation("duplicate key value violates unique constraint \"users_email_key\""));
        }
        let created = User {
            id: self.ids.next(),
            email: user.email.clone(),
            name: user.name.clone(),
            password_hash: user.password_hash.clone(),
            role: user.role.clone(),
            created_at: Utc::now(),
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: i32, changes: &UserChanges) -> Result<User, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let user = rows
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;
        if let Some(name) = &changes.name {
            user.name = name.clone();
        }
        if let Some(email) = &changes.email {
            user.email = email.clone();
        }
        Ok(user.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|u| u.id != id);
        if rows.len() == before {
            return Err(AppError::NotFound("User not found".into()));
        }
        Ok(())
    }

    async fn supports_role(&self) -> Result<bool, AppError> {
        Ok(self.has_role_column)
    }
}

#[derive(Default)]
pub struct InMemoryRaffles {
    rows: Mutex<Vec<Raffle>>,
    ids: Sequence,
}

impl InMemoryRaffles {
    pub fn exists(&self, id: i32) -> bool {
        self.rows.lock().unwrap().iter().any(|r| r.id == id)
    }
}

#[async_trait]
impl RaffleRepository for InMemoryRaffles {
    async fn list(&self) -> Result<Vec<Raffle>, AppError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Raffle>, AppError> {
        Ok(self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn create(&self, raffle: &NewRaffle) -> Result<Raffle, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let created = Raffle {
            id: self.ids.next(),
            title: raffle.title.clone(),
            prize: raffle.prize.clone(),
            created_at: Utc::now(),
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: i32, changes: &RaffleChanges) -> Result<Raffle, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let raffle = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound("Raffle not found".into()))?;
        if let Some(title) = &changes.title {
            raffle.title = title.clone();
        }
        if let Some(prize) = &changes.prize {
            raffle.prize = prize.clone();
        }
        Ok(raffle.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        if rows.len() == before {
            return Err(AppError::NotFound("Raffle not found".into()));
        }
        Ok(())
    }
}

/// Tickets with foreign keys checked against the sibling stores.
pub struct InMemoryTickets {
    rows: Mutex<Vec<Ticket>>,
    ids: Sequence,
    users: Arc<InMemoryUsers>,
    raffles: Arc<InMemoryRaffles>,
}

impl InMemoryTickets {
    pub fn new(users: Arc<InMemoryUsers>, raffles: Arc<InMemoryRaffles>) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            ids: Sequence::default(),
            users,
            raffles,
        }
    }
}

#[async_trait]
impl TicketRepository for InMemoryTickets {
    async fn list(&self) -> Result<Vec<Ticket>, AppError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ticket>, AppError> {
        Ok(self.rows.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn create(&self, ticket: &NewTicket) -> Result<Ticket, AppError> {
        let user_exists = self.users.find_by_id(ticket.user_id).await?.is_some();
        if !user_exists || !self.raffles.exists(ticket.raffle_id) {
            return Err(constraint_violation("insert or update on table \"tickets\" violates foreign key constraint"));
        }

        let mut rows = self.rows.lock().unwrap();
        let created = Ticket {
            id: self.ids.next(),
            number: ticket.number,
            user_id: ticket.user_id,
            raffle_id: ticket.raffle_id,
            created_at: Utc::now(),
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn update_number(&self, id: i32, number: Option<i32>) -> Result<Ticket, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let ticket = rows
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::NotFound("Ticket not found".into()))?;
        if let Some(number) = number {
            ticket.number = number;
        }
        Ok(ticket.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|t| t.id != id);
        if rows.len() == before {
            return Err(AppError::NotFound("Ticket not found".into()));
        }
        Ok(())
    }
}

/// Probe whose health the test controls.
pub struct FakeProbe {
    healthy: AtomicBool,
}

impl FakeProbe {
    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }
}

#[async_trait]
impl DatabaseProbe for FakeProbe {
    async fn ping(&self) -> Result<(), AppError> {
        if self.healthy.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AppError::Internal("connection refused".into()))
        }
    }
}

/// Test application backed by in-memory stores
pub struct TestApp {
    pub server: TestServer,
    pub users: Arc<InMemoryUsers>,
    pub raffles: Arc<InMemoryRaffles>,
    pub probe: Arc<FakeProbe>,
    pub tokens: Arc<TokenIssuer>,
}

impl TestApp {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUsers::with_role_column());
        let raffles = Arc::new(InMemoryRaffles::default());
        let tickets = Arc::new(InMemoryTickets::new(users.clone(), raffles.clone()));
        let probe = Arc::new(FakeProbe {
            healthy: AtomicBool::new(true),
        });
        let tokens = Arc::new(TokenIssuer::new(TEST_SECRET, Duration::minutes(60)));

        let state = AppState::new(
            users.clone(),
            raffles.clone(),
            tickets,
            probe.clone(),
            tokens.clone(),
        );
        let server = TestServer::new(create_router(state)).expect("test server");

        Self {
            server,
            users,
            raffles,
            probe,
            tokens,
        }
    }

    /// Register a user and return its JSON representation
    pub async fn register(&self, email: &str, password: &str) -> Value {
        let response = self
            .server
            .post("/register")
            .json(&json!({"email": email, "name": "Test User", "password": password}))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Value>()["user"].clone()
    }

    /// Create a raffle and return its id
    pub async fn create_raffle(&self, title: &str) -> i64 {
        let response = self
            .server
            .post("/raffles")
            .json(&json!({"title": title, "description": "A new car"}))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Value>()["raffle"]["id"].as_i64().expect("raffle id")
    }
}

/// Generate a unique test email
pub fn unique_email() -> String {
    SafeEmail().fake()
}
