//! # Domain Layer
//!
//! Core entities of the raffle system and the data-access contracts they are
//! stored through. Independent of any framework or infrastructure concern.
//!
//! ## Structure
//!
//! - **entities**: User, Raffle, Ticket and their repository traits
//! - **probe**: database reachability contract

pub mod entities;
pub mod probe;

// Re-export commonly used types
pub use entities::*;
pub use probe::DatabaseProbe;

#[cfg(test)]
pub use probe::MockDatabaseProbe;
