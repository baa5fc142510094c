//! One-shot superadmin creation.
//!
//! Runs the same readiness wait, migrations and superadmin step as server
//! startup, then exits. Exits non-zero on any failure.

use anyhow::{Context, Result};
use clap::Parser;

use raffle_api::bootstrap::{self, SuperadminOutcome};
use raffle_api::config::Settings;
use raffle_api::infrastructure::database::{self, PgDatabaseProbe, QueryInstrument};
use raffle_api::infrastructure::repositories::PgUserRepository;

#[derive(Debug, Parser)]
#[command(name = "create-superadmin", about = "Create the superadmin account if missing")]
struct Args {
    /// Database URL; overrides DATABASE_URL
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    raffle_api::telemetry::init_tracing();
    let args = Args::parse();

    let settings =
        Settings::load_for_bootstrap(args.database_url).context("failed to load configuration")?;
    let pool = database::create_pool(&settings.database).context("invalid database URL")?;
    let instrument = QueryInstrument::new(settings.database.slow_query_threshold());
    let probe = PgDatabaseProbe::new(pool.clone(), instrument);
    let users = PgUserRepository::new(pool.clone(), instrument);

    let outcome = bootstrap::run(&pool, &probe, &users, &settings)
        .await
        .context("superadmin bootstrap failed")?;

    match outcome {
        SuperadminOutcome::AlreadyExists => {
            tracing::info!(email = %settings.superadmin.email, "Superadmin already present")
        }
        SuperadminOutcome::Created { with_role } => {
            tracing::info!(email = %settings.superadmin.email, with_role, "Superadmin created")
        }
    }

    pool.close().await;
    Ok(())
}
