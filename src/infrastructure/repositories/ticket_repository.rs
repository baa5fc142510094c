//! Ticket Repository Implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{NewTicket, Ticket, TicketRepository};
use crate::infrastructure::database::QueryInstrument;
use crate::shared::error::AppError;

const MODEL: &str = "Ticket";

#[derive(Debug, sqlx::FromRow)]
struct TicketRow {
    id: i32,
    number: i32,
    user_id: i32,
    raffle_id: i32,
    created_at: DateTime<Utc>,
}

impl From<TicketRow> for Ticket {
    fn from(row: TicketRow) -> Self {
        Self {
            id: row.id,
            number: row.number,
            user_id: row.user_id,
            raffle_id: row.raffle_id,
            created_at: row.created_at,
        }
    }
}

#[derive(Clone)]
pub struct PgTicketRepository {
    pool: PgPool,
    instrument: QueryInstrument,
}

impl PgTicketRepository {
    pub fn new(pool: PgPool, instrument: QueryInstrument) -> Self {
        Self { pool, instrument }
    }
}

#[async_trait]
impl TicketRepository for PgTicketRepository {
    async fn list(&self) -> Result<Vec<Ticket>, AppError> {
        let rows = self
            .instrument
            .run(
                MODEL,
                "findMany",
                sqlx::query_as::<_, TicketRow>(
                    "SELECT id, number, user_id, raffle_id, created_at FROM tickets ORDER BY id",
                )
                .fetch_all(&self.pool),
            )
            .await?;

        Ok(rows.into_iter().map(Ticket::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ticket>, AppError> {
        let row = self
            .instrument
            .run(
                MODEL,
                "findUnique",
                sqlx::query_as::<_, TicketRow>(
                    "SELECT id, number, user_id, raffle_id, created_at FROM tickets WHERE id = $1",
                )
                .bind(id)
                .fetch_optional(&self.pool),
            )
            .await?;

        Ok(row.map(Ticket::from))
    }

    async fn create(&self, ticket: &NewTicket) -> Result<Ticket, AppError> {
        let row = self
            .instrument
            .run(
                MODEL,
                "create",
                sqlx::query_as::<_, TicketRow>(
                    r#"
                    INSERT INTO tickets (number, user_id, raffle_id)
                    VALUES ($1, $2, $3)
                    RETURNING id, number, user_id, raffle_id, created_at
                    "#,
                )
                .bind(ticket.number)
                .bind(ticket.user_id)
                .bind(ticket.raffle_id)
                .fetch_one(&self.pool),
            )
            .await?;

        Ok(row.into())
    }

    async fn update_number(&self, id: i32, number: Option<i32>) -> Result<Ticket, AppError> {
        let row = self
            .instrument
            .run(
                MODEL,
                "update",
                sqlx::query_as::<_, TicketRow>(
                    r#"
                    UPDATE tickets
                    SET number = COALESCE($2, number)
                    WHERE id = $1
                    RETURNING id, number, user_id, raffle_id, created_at
                    "#,
                )
                .bind(id)
                .bind(number)
                .fetch_optional(&self.pool),
            )
            .await?
            .ok_or_else(|| AppError::NotFound("Ticket not found".into()))?;

        Ok(row.into())
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = self
            .instrument
            .run(
                MODEL,
                "delete",
                sqlx::query("DELETE FROM tickets WHERE id = $1")
                    .bind(id)
                    .execute(&self.pool),
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Ticket not found".into()));
        }

        Ok(())
    }
}
