//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use raffle_api::infrastructure::database::QueryInstrument;
//! use raffle_api::infrastructure::repositories::{
//!     PgRaffleRepository, PgTicketRepository, PgUserRepository,
//! };
//!
//! fn setup_repositories(pool: PgPool) {
//!     let instrument = QueryInstrument::default();
//!     let user_repo = PgUserRepository::new(pool.clone(), instrument);
//!     let raffle_repo = PgRaffleRepository::new(pool.clone(), instrument);
//!     let ticket_repo = PgTicketRepository::new(pool, instrument);
//! }
//! ```

pub mod raffle_repository;
pub mod ticket_repository;
pub mod user_repository;

pub use raffle_repository::PgRaffleRepository;
pub use ticket_repository::PgTicketRepository;
pub use user_repository::PgUserRepository;
