//! Ticket entity and repository trait.
//!
//! Maps to the `tickets` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A numbered ticket held by a user in a raffle.
///
/// Maps to the `tickets` table:
/// - id: SERIAL PRIMARY KEY
/// - number: INTEGER NOT NULL
/// - user_id: INTEGER NOT NULL REFERENCES users(id)
/// - raffle_id: INTEGER NOT NULL REFERENCES raffles(id)
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
///
/// Nothing stops two tickets in the same raffle from sharing a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i32,
    pub number: i32,
    pub user_id: i32,
    pub raffle_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTicket {
    pub number: i32,
    pub user_id: i32,
    pub raffle_id: i32,
}

/// Repository trait for Ticket data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Ticket>, AppError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Ticket>, AppError>;

    /// Dangling user or raffle references fail at the store.
    async fn create(&self, ticket: &NewTicket) -> Result<Ticket, AppError>;

    /// Change the ticket number; `None` is a no-op that still returns the row.
    /// Returns `AppError::NotFound` for unknown IDs.
    async fn update_number(&self, id: i32, number: Option<i32>) -> Result<Ticket, AppError>;

    /// Returns `AppError::NotFound` for unknown IDs.
    async fn delete(&self, id: i32) -> Result<(), AppError>;
}
