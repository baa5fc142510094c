//! Application settings and configuration structures.

use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::shared::retry::RetryPolicy;

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server configuration (host, port)
    pub server: ServerSettings,

    /// Database configuration (PostgreSQL)
    pub database: DatabaseSettings,

    /// JWT authentication settings
    pub jwt: JwtSettings,

    /// CORS configuration
    pub cors: CorsSettings,

    /// Privileged account created at startup
    pub superadmin: SuperadminSettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// Server binding configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,

    /// Port number to listen on
    pub port: u16,
}

/// PostgreSQL database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Database connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections to maintain
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    pub acquire_timeout: u64,

    /// Queries slower than this are logged as warnings
    pub slow_query_threshold_ms: u64,

    /// Attempts made by the startup readiness check
    pub connect_retries: u32,

    /// Base delay between readiness attempts, multiplied by the attempt number
    pub connect_retry_delay_ms: u64,

    /// Apply bundled migrations once the database is reachable
    pub run_migrations: bool,
}

/// JWT authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens
    pub secret: String,

    /// Login token expiry in minutes
    pub token_expiry_minutes: i64,
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins (comma-separated in env)
    pub allowed_origins: Vec<String>,
}

/// Credentials for the privileged account ensured at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct SuperadminSettings {
    pub email: String,

    pub name: String,

    /// Written only when the users table has a role column
    pub role: String,

    /// No default on purpose; bootstrap refuses to create the account without it
    pub password: Option<String>,
}

/// Minimum required length for JWT secret (256 bits = 32 bytes)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Signing key used only when `JWT_SECRET` is unset in development.
pub const DEV_JWT_SECRET: &str = "dev-secret-do-not-use-outside-development";

const DEVELOPMENT: &str = "development";

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. Built-in defaults
    /// 2. config/default.toml (base configuration)
    /// 3. config/{RUN_ENV}.toml (environment-specific overrides)
    /// 4. Environment variables (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed,
    /// or if JWT secret is missing outside development or too short.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_database_url(None)
    }

    /// Same as [`Settings::load`], with an explicit database URL taking
    /// precedence over every other source.
    pub fn load_with_database_url(database_url: Option<String>) -> Result<Self, ConfigError> {
        let environment = current_environment();
        let dev_secret = (environment == DEVELOPMENT).then(|| DEV_JWT_SECRET.to_string());

        let settings = Self::build(environment, database_url, dev_secret)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Settings for the one-shot superadmin bootstrap.
    ///
    /// The bootstrap never signs tokens, so the JWT section is neither required
    /// nor validated. The result must not be used to build a [`TokenIssuer`].
    ///
    /// [`TokenIssuer`]: crate::application::services::TokenIssuer
    pub fn load_for_bootstrap(database_url: Option<String>) -> Result<Self, ConfigError> {
        Self::build(current_environment(), database_url, Some(String::new()))
    }

    /// Layer every source without validating the result.
    fn build(
        environment: String,
        database_url: Option<String>,
        default_secret: Option<String>,
    ) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("environment", environment.clone())?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 0)?
            .set_default("database.acquire_timeout", 30)?
            .set_default("database.slow_query_threshold_ms", 200)?
            .set_default("database.connect_retries", 5)?
            .set_default("database.connect_retry_delay_ms", 2000)?
            .set_default("database.run_migrations", true)?
            .set_default("jwt.token_expiry_minutes", 60)?
            .set_default("cors.allowed_origins", Vec::<String>::new())?
            .set_default("superadmin.email", "rifa@megarifasapp.com")?
            .set_default("superadmin.name", "Super Admin")?
            .set_default("superadmin.role", "superadmin")?
            // Only development and the bootstrap CLI run without a configured key
            .set_default("jwt.secret", default_secret)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // APP__SERVER__PORT=3000 -> server.port = 3000
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option(
                "server.port",
                std::env::var("PORT")
                    .ok()
                    .or_else(|| std::env::var("SERVER_PORT").ok()),
            )?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("database.url", database_url)?
            .set_override_option("jwt.secret", std::env::var("JWT_SECRET").ok())?
            .set_override_option("superadmin.email", std::env::var("SUPERADMIN_EMAIL").ok())?
            .set_override_option(
                "superadmin.password",
                std::env::var("SUPERADMIN_PASSWORD").ok(),
            )?
            .build()?
            .try_deserialize()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::Message(format!(
                "JWT secret must be at least {} characters for security. Current length: {}",
                MIN_JWT_SECRET_LENGTH,
                self.jwt.secret.len()
            )));
        }
        if self.jwt.token_expiry_minutes <= 0 {
            return Err(ConfigError::Message(
                "jwt.token_expiry_minutes must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Whether the development signing key is in use.
    pub fn uses_development_secret(&self) -> bool {
        self.jwt.secret == DEV_JWT_SECRET
    }

    /// Get the full server address as a string.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn current_environment() -> String {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();
    std::env::var("RUN_ENV").unwrap_or_else(|_| DEVELOPMENT.into())
}

impl ServerSettings {
    /// Get the socket address for binding.
    pub fn socket_addr(&self) -> Result<std::net::SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

impl DatabaseSettings {
    /// Readiness policy: `connect_retries` attempts, delay growing linearly.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::linear(
            self.connect_retries,
            Duration::from_millis(self.connect_retry_delay_ms),
        )
    }

    pub fn slow_query_threshold(&self) -> Duration {
        Duration::from_millis(self.slow_query_threshold_ms)
    }
}
