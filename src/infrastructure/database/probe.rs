//! PostgreSQL reachability probe.

use async_trait::async_trait;
use sqlx::PgPool;

use super::QueryInstrument;
use crate::domain::DatabaseProbe;
use crate::shared::error::AppError;

#[derive(Clone)]
pub struct PgDatabaseProbe {
    pool: PgPool,
    instrument: QueryInstrument,
}

impl PgDatabaseProbe {
    pub fn new(pool: PgPool, instrument: QueryInstrument) -> Self {
        Self { pool, instrument }
    }
}

#[async_trait]
impl DatabaseProbe for PgDatabaseProbe {
    async fn ping(&self) -> Result<(), AppError> {
        self.instrument
            .run("raw", "queryRaw", sqlx::query("SELECT 1").execute(&self.pool))
            .await?;
        Ok(())
    }
}
