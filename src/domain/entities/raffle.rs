//! Raffle entity and repository trait.
//!
//! Maps to the `raffles` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A raffle offering a single prize.
///
/// Maps to the `raffles` table:
/// - id: SERIAL PRIMARY KEY
/// - title: VARCHAR(255) NOT NULL
/// - prize: TEXT NOT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Raffle {
    pub id: i32,
    pub title: String,
    /// Prize description
    pub prize: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRaffle {
    pub title: String,
    pub prize: String,
}

/// Partial update; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RaffleChanges {
    pub title: Option<String>,
    pub prize: Option<String>,
}

/// Repository trait for Raffle data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RaffleRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Raffle>, AppError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Raffle>, AppError>;

    async fn create(&self, raffle: &NewRaffle) -> Result<Raffle, AppError>;

    /// Returns `AppError::NotFound` for unknown IDs.
    async fn update(&self, id: i32, changes: &RaffleChanges) -> Result<Raffle, AppError>;

    /// Returns `AppError::NotFound` for unknown IDs.
    async fn delete(&self, id: i32) -> Result<(), AppError>;
}
