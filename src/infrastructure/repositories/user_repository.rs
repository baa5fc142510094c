//! User Repository Implementation
//!
//! PostgreSQL implementation of the UserRepository trait.
//! Maps between the database schema and domain User entity.
//!
//! Deployments created before the role marker existed have no `users.role`
//! column. The repository checks `information_schema` instead of probing by
//! failure and selects `NULL` in its place when the column is missing.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{NewUser, User, UserChanges, UserRepository};
use crate::infrastructure::database::QueryInstrument;
use crate::shared::error::AppError;

const MODEL: &str = "User";

const COLUMNS_WITH_ROLE: &str = "id, email, name, password, role, created_at";
const COLUMNS_WITHOUT_ROLE: &str = "id, email, name, password, NULL::VARCHAR AS role, created_at";

/// Database row representation matching the users table schema.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i32,
    email: String,
    name: String,
    password: String,
    role: Option<String>,
    created_at: DateTime<Utc>,
}

impl UserRow {
    /// Convert database row to domain User entity.
    fn into_user(self) -> User {
        User {
            id: self.id,
            email: self.email,
            name: self.name,
            password_hash: self.password,
            role: self.role,
            created_at: self.created_at,
        }
    }
}

/// PostgreSQL user repository implementation.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
    instrument: QueryInstrument,
    // Answered once per process; a migration adding the column needs a restart.
    role_column: Arc<OnceLock<bool>>,
}

impl PgUserRepository {
    /// Create a new PgUserRepository with the given connection pool.
    pub fn new(pool: PgPool, instrument: QueryInstrument) -> Self {
        Self {
            pool,
            instrument,
            role_column: Arc::new(OnceLock::new()),
        }
    }

    async fn columns(&self) -> Result<&'static str, AppError> {
        Ok(if self.supports_role().await? {
            COLUMNS_WITH_ROLE
        } else {
            COLUMNS_WITHOUT_ROLE
        })
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn list(&self) -> Result<Vec<User>, AppError> {
        let sql = format!("SELECT {} FROM users ORDER BY id", self.columns().await?);
        let rows = self
            .instrument
            .run(
                MODEL,
                "findMany",
                sqlx::query_as::<_, UserRow>(&sql).fetch_all(&self.pool),
            )
            .await?;

        Ok(rows.into_iter().map(UserRow::into_user).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", self.columns().await?);
        let row = self
            .instrument
            .run(
                MODEL,
                "findUnique",
                sqlx::query_as::<_, UserRow>(&sql)
                    .bind(id)
                    .fetch_optional(&self.pool),
            )
            .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", self.columns().await?);
        let row = self
            .instrument
            .run(
                MODEL,
                "findUnique",
                sqlx::query_as::<_, UserRow>(&sql)
                    .bind(email)
                    .fetch_optional(&self.pool),
            )
            .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn create(&self, user: &NewUser) -> Result<User, AppError> {
        let with_role = self.supports_role().await?;
        let row = if with_role {
            let sql = format!(
                "INSERT INTO users (email, name, password, role) VALUES ($1, $2, $3, $4) RETURNING {}",
                COLUMNS_WITH_ROLE
            );
            self.instrument
                .run(
                    MODEL,
                    "create",
                    sqlx::query_as::<_, UserRow>(&sql)
                        .bind(&user.email)
                        .bind(&user.name)
                        .bind(&user.password_hash)
                        .bind(&user.role)
                        .fetch_one(&self.pool),
                )
                .await?
        } else {
            if user.role.is_some() {
                tracing::warn!(email = %user.email, "users.role column missing, role not stored");
            }
            let sql = format!(
                "INSERT INTO users (email, name, password) VALUES ($1, $2, $3) RETURNING {}",
                COLUMNS_WITHOUT_ROLE
            );
            self.instrument
                .run(
                    MODEL,
                    "create",
                    sqlx::query_as::<_, UserRow>(&sql)
                        .bind(&user.email)
                        .bind(&user.name)
                        .bind(&user.password_hash)
                        .fetch_one(&self.pool),
                )
                .await?
        };

        Ok(row.into_user())
    }

    async fn update(&self, id: i32, changes: &UserChanges) -> Result<User, AppError> {
        let sql = format!(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                email = COALESCE($3, email)
            WHERE id = $1
            RETURNING {}
            "#,
            self.columns().await?
        );
        let row = self
            .instrument
            .run(
                MODEL,
                "update",
                sqlx::query_as::<_, UserRow>(&sql)
                    .bind(id)
                    .bind(&changes.name)
                    .bind(&changes.email)
                    .fetch_optional(&self.pool),
            )
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;

        Ok(row.into_user())
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = self
            .instrument
            .run(
                MODEL,
                "delete",
                sqlx::query("DELETE FROM users WHERE id = $1")
                    .bind(id)
                    .execute(&self.pool),
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User not found".into()));
        }

        Ok(())
    }

    async fn supports_role(&self) -> Result<bool, AppError> {
        cached_flag(&self.role_column, || async {
            let present = self
                .instrument
                .run(
                    MODEL,
                    "describe",
                    sqlx::query_scalar::<_, bool>(
                        r#"
                        SELECT EXISTS (
                            SELECT 1 FROM information_schema.columns
                            WHERE table_schema = current_schema()
                              AND table_name = 'users'
                              AND column_name = 'role'
                        )
                        "#,
                    )
                    .fetch_one(&self.pool),
                )
                .await?;
            Ok(present)
        })
        .await
    }
}

/// Returns the cached flag, running `lookup` only while the cell is empty.
/// Both answers are kept; a failed lookup leaves the cell empty.
async fn cached_flag<F, Fut>(cell: &OnceLock<bool>, lookup: F) -> Result<bool, AppError>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<bool, AppError>>,
{
    if let Some(flag) = cell.get() {
        return Ok(*flag);
    }

    let flag = lookup().await?;
    Ok(*cell.get_or_init(|| flag))
}
