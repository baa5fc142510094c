//! Authentication Service
//!
//! Handles registration and login: password hashing, credential checks and
//! token issuance.

use std::sync::Arc;

use async_trait::async_trait;

use super::token_service::{TokenError, TokenIssuer};
use crate::domain::{NewUser, User, UserRepository};
use crate::shared::error::AppError;
use crate::shared::password::{self, PasswordError};

/// Authentication service trait for dependency injection
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Hash the password and store a new user
    async fn register(&self, email: &str, name: &str, password: &str) -> Result<User, AuthError>;

    /// Check credentials and return a signed login token
    async fn authenticate(&self, email: &str, password: &str) -> Result<String, AuthError>;
}

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("Incorrect password")]
    InvalidPassword,

    #[error(transparent)]
    Repository(#[from] AppError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<PasswordError> for AuthError {
    fn from(e: PasswordError) -> Self {
        AuthError::Internal(e.to_string())
    }
}

impl From<TokenError> for AuthError {
    fn from(e: TokenError) -> Self {
        AuthError::Internal(e.to_string())
    }
}

/// Hash off the async runtime; Argon2 is deliberately slow.
pub async fn hash_password_blocking(password: &str) -> Result<String, AuthError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || password::hash_password(&password))
        .await
        .map_err(|e| AuthError::Internal(e.to_string()))?
        .map_err(AuthError::from)
}

async fn verify_password_blocking(password: &str, hash: &str) -> Result<bool, AuthError> {
    let password = password.to_string();
    let hash = hash.to_string();
    tokio::task::spawn_blocking(move || password::verify_password(&password, &hash))
        .await
        .map_err(|e| AuthError::Internal(e.to_string()))
}

/// AuthService implementation
pub struct AuthServiceImpl {
    user_repo: Arc<dyn UserRepository>,
    tokens: Arc<TokenIssuer>,
}

impl AuthServiceImpl {
    /// Create a new AuthServiceImpl
    pub fn new(user_repo: Arc<dyn UserRepository>, tokens: Arc<TokenIssuer>) -> Self {
        Self { user_repo, tokens }
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn register(&self, email: &str, name: &str, password: &str) -> Result<User, AuthError> {
        let password_hash = hash_password_blocking(password).await?;

        // Uniqueness is left to the store; a duplicate surfaces as a repository error
        let user = self
            .user_repo
            .create(&NewUser {
                email: email.to_string(),
                name: name.to_string(),
                password_hash,
                role: None,
            })
            .await?;

        tracing::info!(user_id = user.id, "User registered");
        Ok(user)
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !verify_password_blocking(password, &user.password_hash).await? {
            return Err(AuthError::InvalidPassword);
        }

        Ok(self.tokens.issue(user.id, &user.email)?)
    }
}
