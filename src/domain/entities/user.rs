//! User entity and repository trait.
//!
//! Maps to the `users` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Represents a user account.
///
/// Maps to the `users` table:
/// - id: SERIAL PRIMARY KEY
/// - email: VARCHAR(255) NOT NULL UNIQUE
/// - name: VARCHAR(255) NOT NULL
/// - password: VARCHAR(255) NOT NULL (Argon2 PHC string)
/// - role: VARCHAR(32) NULL (absent on older schemas)
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,

    /// Email address (unique)
    pub email: String,

    /// Display name
    pub name: String,

    /// Argon2 password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Role marker, only set on the privileged account
    pub role: Option<String>,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn has_role(&self, role: &str) -> bool {
        self.role.as_deref() == Some(role)
    }
}

/// Values for inserting a user. The hash must already be computed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: Option<String>,
}

/// Partial profile update; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Repository trait for User data access operations.
///
/// Implementations of this trait handle the actual database interactions.
/// The trait is defined in the domain layer to maintain dependency inversion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List every user.
    async fn list(&self) -> Result<Vec<User>, AppError>;

    /// Find a user by ID.
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError>;

    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Insert a user. Duplicate emails fail at the store.
    ///
    /// `role` is dropped silently when [`UserRepository::supports_role`] is false.
    async fn create(&self, user: &NewUser) -> Result<User, AppError>;

    /// Apply a partial update. Returns `AppError::NotFound` for unknown IDs.
    async fn update(&self, id: i32, changes: &UserChanges) -> Result<User, AppError>;

    /// Delete a user by ID. Returns `AppError::NotFound` for unknown IDs.
    async fn delete(&self, id: i32) -> Result<(), AppError>;

    /// Whether the backing schema can store the role marker.
    async fn supports_role(&self) -> Result<bool, AppError>;
}
