//! # Domain Entities
//!
//! Core domain entities representing the main business objects.
//! All entities map directly to their corresponding database tables.
//!
//! - **User**: account with credentials and an optional role marker
//! - **Raffle**: a raffle and its prize
//! - **Ticket**: a numbered ticket linking a user to a raffle
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod raffle;
mod ticket;
mod user;

pub use raffle::{NewRaffle, Raffle, RaffleChanges, RaffleRepository};
pub use ticket::{NewTicket, Ticket, TicketRepository};
pub use user::{NewUser, User, UserChanges, UserRepository};

#[cfg(test)]
pub use raffle::MockRaffleRepository;
#[cfg(test)]
pub use ticket::MockTicketRepository;
#[cfg(test)]
pub use user::MockUserRepository;
