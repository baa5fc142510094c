//! Response DTOs
//!
//! Data structures for API response bodies.

use serde::Serialize;

use crate::domain::{Raffle, Ticket, User};

/// User response; the password hash never leaves the server
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Raffle response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RaffleResponse {
    pub id: i32,
    pub title: String,
    pub prize: String,
    pub created_at: String,
}

impl From<Raffle> for RaffleResponse {
    fn from(raffle: Raffle) -> Self {
        Self {
            id: raffle.id,
            title: raffle.title,
            prize: raffle.prize,
            created_at: raffle.created_at.to_rfc3339(),
        }
    }
}

/// Ticket response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketResponse {
    pub id: i32,
    pub number: i32,
    pub user_id: i32,
    pub raffle_id: i32,
    pub created_at: String,
}

impl From<Ticket> for TicketResponse {
    fn from(ticket: Ticket) -> Self {
        Self {
            id: ticket.id,
            number: ticket.number,
            user_id: ticket.user_id,
            raffle_id: ticket.raffle_id,
            created_at: ticket.created_at.to_rfc3339(),
        }
    }
}

/// `{message, user}` envelope for register, create and update
#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub message: &'static str,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct RaffleEnvelope {
    pub message: &'static str,
    pub raffle: RaffleResponse,
}

#[derive(Debug, Serialize)]
pub struct TicketEnvelope {
    pub message: &'static str,
    pub ticket: TicketResponse,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
}

/// Plain acknowledgement, used by deletes and the liveness route
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
