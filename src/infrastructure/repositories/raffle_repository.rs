//! Raffle Repository Implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{NewRaffle, Raffle, RaffleChanges, RaffleRepository};
use crate::infrastructure::database::QueryInstrument;
use crate::shared::error::AppError;

const MODEL: &str = "Raffle";

#[derive(Debug, sqlx::FromRow)]
struct RaffleRow {
    id: i32,
    title: String,
    prize: String,
    created_at: DateTime<Utc>,
}

impl From<RaffleRow> for Raffle {
    fn from(row: RaffleRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            prize: row.prize,
            created_at: row.created_at,
        }
    }
}

#[derive(Clone)]
pub struct PgRaffleRepository {
    pool: PgPool,
    instrument: QueryInstrument,
}

impl PgRaffleRepository {
    pub fn new(pool: PgPool, instrument: QueryInstrument) -> Self {
        Self { pool, instrument }
    }
}

#[async_trait]
impl RaffleRepository for PgRaffleRepository {
    async fn list(&self) -> Result<Vec<Raffle>, AppError> {
        let rows = self
            .instrument
            .run(
                MODEL,
                "findMany",
                sqlx::query_as::<_, RaffleRow>(
                    "SELECT id, title, prize, created_at FROM raffles ORDER BY id",
                )
                .fetch_all(&self.pool),
            )
            .await?;

        Ok(rows.into_iter().map(Raffle::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Raffle>, AppError> {
        let row = self
            .instrument
            .run(
                MODEL,
                "findUnique",
                sqlx::query_as::<_, RaffleRow>(
                    "SELECT id, title, prize, created_at FROM raffles WHERE id = $1",
                )
                .bind(id)
                .fetch_optional(&self.pool),
            )
            .await?;

        Ok(row.map(Raffle::from))
    }

    async fn create(&self, raffle: &NewRaffle) -> Result<Raffle, AppError> {
        let row = self
            .instrument
            .run(
                MODEL,
                "create",
                sqlx::query_as::<_, RaffleRow>(
                    r#"
                    INSERT INTO raffles (title, prize)
                    VALUES ($1, $2)
                    RETURNING id, title, prize, created_at
                    "#,
                )
                .bind(&raffle.title)
                .bind(&raffle.prize)
                .fetch_one(&self.pool),
            )
            .await?;

        Ok(row.into())
    }

    async fn update(&self, id: i32, changes: &RaffleChanges) -> Result<Raffle, AppError> {
        let row = self
            .instrument
            .run(
                MODEL,
                "update",
                sqlx::query_as::<_, RaffleRow>(
                    r#"
                    UPDATE raffles
                    SET title = COALESCE($2, title),
                        prize = COALESCE($3, prize)
                    WHERE id = $1
                    RETURNING id, title, prize, created_at
                    "#,
                )
                .bind(id)
                .bind(&changes.title)
                .bind(&changes.prize)
                .fetch_optional(&self.pool),
            )
            .await?
            .ok_or_else(|| AppError::NotFound("Raffle not found".into()))?;

        Ok(row.into())
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = self
            .instrument
            .run(
                MODEL,
                "delete",
                sqlx::query("DELETE FROM raffles WHERE id = $1")
                    .bind(id)
                    .execute(&self.pool),
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Raffle not found".into()));
        }

        Ok(())
    }
}
