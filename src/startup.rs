//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;

use crate::application::services::{AuthService, AuthServiceImpl, TokenIssuer};
use crate::bootstrap;
use crate::config::Settings;
use crate::domain::{DatabaseProbe, RaffleRepository, TicketRepository, UserRepository};
use crate::infrastructure::database::{self, PgDatabaseProbe, QueryInstrument};
use crate::infrastructure::repositories::{
    PgRaffleRepository, PgTicketRepository, PgUserRepository,
};
use crate::presentation::http::routes;
use crate::presentation::middleware::cors;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub raffles: Arc<dyn RaffleRepository>,
    pub tickets: Arc<dyn TicketRepository>,
    pub probe: Arc<dyn DatabaseProbe>,
    pub auth: Arc<dyn AuthService>,
}

impl AppState {
    /// Wire data-access handles to the given stores.
    pub fn new(
        users: Arc<dyn UserRepository>,
        raffles: Arc<dyn RaffleRepository>,
        tickets: Arc<dyn TicketRepository>,
        probe: Arc<dyn DatabaseProbe>,
        tokens: Arc<TokenIssuer>,
    ) -> Self {
        let auth = Arc::new(AuthServiceImpl::new(users.clone(), tokens));
        Self {
            users,
            raffles,
            tickets,
            probe,
            auth,
        }
    }

    /// PostgreSQL-backed state.
    pub fn from_pool(pool: PgPool, settings: &Settings) -> Self {
        let instrument = QueryInstrument::new(settings.database.slow_query_threshold());
        Self::new(
            Arc::new(PgUserRepository::new(pool.clone(), instrument)),
            Arc::new(PgRaffleRepository::new(pool.clone(), instrument)),
            Arc::new(PgTicketRepository::new(pool.clone(), instrument)),
            Arc::new(PgDatabaseProbe::new(pool, instrument)),
            Arc::new(TokenIssuer::from_settings(&settings.jwt)),
        )
    }
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings.
    ///
    /// Binds the listener and spawns the bootstrap routine; neither waits for
    /// the database.
    pub async fn build(settings: Settings) -> Result<Self> {
        // Lazy pool: only a malformed URL fails here
        let pool = database::create_pool(&settings.database)?;
        tracing::info!("Database connection pool created");

        let state = AppState::from_pool(pool.clone(), &settings);

        // Build router with middleware
        let router = routes::create_router(state.clone())
            .layer(cors::create_cors_layer(&settings.cors));

        // Bind to address
        let addr = settings.server.socket_addr()?;
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);

        tokio::spawn(async move {
            match bootstrap::run(&pool, state.probe.as_ref(), state.users.as_ref(), &settings).await
            {
                Ok(outcome) => tracing::info!(?outcome, "Bootstrap finished"),
                Err(e) => tracing::error!(error = %e, "Bootstrap failed"),
            }
        });

        Ok(Self { listener, router })
    }

    /// Run the server until Ctrl-C or SIGTERM
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        tracing::info!("Server stopped");
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
