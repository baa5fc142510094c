//! Database Module
//!
//! PostgreSQL connection pool, migrations, query instrumentation and the
//! reachability probe.

pub mod instrument;
pub mod probe;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

use crate::config::DatabaseSettings;

pub use instrument::QueryInstrument;
pub use probe::PgDatabaseProbe;

/// Create a PostgreSQL connection pool.
///
/// No connection is opened here: the pool connects on first use, so the
/// server can start while the database is still coming up. Only a malformed
/// URL fails.
pub fn create_pool(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout))
        .connect_lazy(&settings.url)
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
