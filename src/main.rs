//! # Raffle API
//!
//! Application entry point. Initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Database connection pool (lazy) and the bootstrap task
//! - HTTP server

use anyhow::Result;
use tracing::info;

use raffle_api::config::Settings;
use raffle_api::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for structured logging
    raffle_api::telemetry::init_tracing();

    info!("Starting Raffle API...");

    // Load configuration from environment and config files
    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        "Configuration loaded"
    );
    if settings.uses_development_secret() {
        tracing::warn!("JWT_SECRET is not set; using the development signing key");
    }

    // Build and run the application
    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
