//! Startup Bootstrap
//!
//! Waits for the database, applies migrations and makes sure the privileged
//! account exists. Runs alongside the HTTP listener; a failure here is logged
//! and never stops the server.

use sqlx::PgPool;

use crate::application::services::{hash_password_blocking, AuthError};
use crate::config::{Settings, SuperadminSettings};
use crate::domain::{DatabaseProbe, NewUser, UserRepository};
use crate::infrastructure::database;
use crate::shared::error::AppError;
use crate::shared::retry::{retry_with_backoff, RetryPolicy};

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Database unreachable: {0}")]
    DatabaseUnavailable(#[source] AppError),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("SUPERADMIN_PASSWORD is not set; refusing to create the superadmin account")]
    MissingPassword,

    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Store error: {0}")]
    Store(#[from] AppError),
}

impl From<AuthError> for BootstrapError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Repository(inner) => BootstrapError::Store(inner),
            other => BootstrapError::Hash(other.to_string()),
        }
    }
}

/// What the superadmin step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuperadminOutcome {
    AlreadyExists,
    Created { with_role: bool },
}

/// Ping the database until it answers or the policy gives up.
pub async fn wait_for_database(
    probe: &dyn DatabaseProbe,
    policy: &RetryPolicy,
) -> Result<(), BootstrapError> {
    retry_with_backoff(policy, "database", move || probe.ping())
        .await
        .map_err(BootstrapError::DatabaseUnavailable)?;

    tracing::info!("Database connection established");
    Ok(())
}

/// Create the superadmin account unless one with the configured email exists.
///
/// The role is written only when the store has a role column; otherwise the
/// account is created without it and a warning is logged.
pub async fn ensure_superadmin(
    users: &dyn UserRepository,
    settings: &SuperadminSettings,
) -> Result<SuperadminOutcome, BootstrapError> {
    if users.find_by_email(&settings.email).await?.is_some() {
        tracing::info!(email = %settings.email, "Superadmin already exists");
        return Ok(SuperadminOutcome::AlreadyExists);
    }

    let password = settings
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or(BootstrapError::MissingPassword)?;
    let password_hash = hash_password_blocking(password).await?;

    let with_role = users.supports_role().await?;
    if !with_role {
        tracing::warn!("Users table has no role column; creating superadmin without a role");
    }

    let user = users
        .create(&NewUser {
            email: settings.email.clone(),
            name: settings.name.clone(),
            password_hash,
            role: with_role.then(|| settings.role.clone()),
        })
        .await?;

    tracing::info!(user_id = user.id, email = %user.email, "Superadmin created");
    Ok(SuperadminOutcome::Created { with_role })
}

/// Full startup sequence: readiness, migrations, superadmin.
pub async fn run(
    pool: &PgPool,
    probe: &dyn DatabaseProbe,
    users: &dyn UserRepository,
    settings: &Settings,
) -> Result<SuperadminOutcome, BootstrapError> {
    wait_for_database(probe, &settings.database.retry_policy()).await?;

    if settings.database.run_migrations {
        database::run_migrations(pool).await?;
        tracing::info!("Database migrations applied");
    }

    ensure_superadmin(users, &settings.superadmin).await
}
