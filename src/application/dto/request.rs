//! Request DTOs
//!
//! Data structures for API request bodies. Required fields are `Option`s so
//! that a missing field becomes a 400 validation error rather than a
//! deserialization failure.

use serde::Deserialize;
use validator::Validate;

/// Registration request, also used by `POST /users`
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        required(message = "email is required"),
        length(min = 1, message = "email is required")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "name is required"),
        length(min = 1, message = "name is required")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "password is required"),
        length(min = 1, message = "password is required")
    )]
    pub password: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(
        required(message = "email is required"),
        length(min = 1, message = "email is required")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "password is required"),
        length(min = 1, message = "password is required")
    )]
    pub password: Option<String>,
}

/// Update user request; absent fields are left unchanged
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Create raffle request. `description` is stored as the prize.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRaffleRequest {
    #[validate(
        required(message = "title is required"),
        length(min = 1, message = "title is required")
    )]
    pub title: Option<String>,

    #[validate(
        required(message = "description is required"),
        length(min = 1, message = "description is required")
    )]
    pub description: Option<String>,
}

/// Update raffle request; absent fields are left unchanged
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRaffleRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Create ticket request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketRequest {
    #[validate(required(message = "number is required"))]
    pub number: Option<i32>,

    #[validate(required(message = "userId is required"))]
    pub user_id: Option<i32>,

    #[validate(required(message = "raffleId is required"))]
    pub raffle_id: Option<i32>,
}

/// Update ticket request
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTicketRequest {
    pub number: Option<i32>,
}
