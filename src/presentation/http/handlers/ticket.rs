//! Ticket Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::application::dto::request::{CreateTicketRequest, UpdateTicketRequest};
use crate::application::dto::response::{MessageResponse, TicketEnvelope, TicketResponse};
use crate::domain::NewTicket;
use crate::presentation::http::extractors::{parse_id, JsonBody};
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// List all tickets
pub async fn list_tickets(
    State(state): State<AppState>,
) -> Result<Json<Vec<TicketResponse>>, AppError> {
    let tickets = state
        .tickets
        .list()
        .await
        .map_err(|e| e.store("Failed to fetch tickets"))?;

    Ok(Json(tickets.into_iter().map(TicketResponse::from).collect()))
}

/// Get a ticket by ID
pub async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TicketResponse>, AppError> {
    let id = parse_id(&id, "ticket")?;

    let ticket = state
        .tickets
        .find_by_id(id)
        .await
        .map_err(|e| e.store("Failed to fetch ticket"))?
        .ok_or_else(|| AppError::NotFound("Ticket not found".into()))?;

    Ok(Json(ticket.into()))
}

/// Create a ticket for an existing user and raffle
pub async fn create_ticket(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateTicketRequest>,
) -> Result<(StatusCode, Json<TicketEnvelope>), AppError> {
    body.validate().map_err(validation_error)?;

    let (Some(number), Some(user_id), Some(raffle_id)) = (body.number, body.user_id, body.raffle_id)
    else {
        return Err(AppError::Validation("Missing required fields".into()));
    };

    // Dangling references are rejected by the foreign keys and surface as 500
    let ticket = state
        .tickets
        .create(&NewTicket {
            number,
            user_id,
            raffle_id,
        })
        .await
        .map_err(|e| e.store("Failed to create ticket"))?;

    Ok((
        StatusCode::CREATED,
        Json(TicketEnvelope {
            message: "Ticket created",
            ticket: ticket.into(),
        }),
    ))
}

/// Update a ticket's number
pub async fn update_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<UpdateTicketRequest>,
) -> Result<Json<TicketEnvelope>, AppError> {
    let id = parse_id(&id, "ticket")?;

    let ticket = state
        .tickets
        .update_number(id, body.number)
        .await
        .map_err(|e| e.store("Failed to update ticket"))?;

    Ok(Json(TicketEnvelope {
        message: "Ticket updated",
        ticket: ticket.into(),
    }))
}

/// Delete a ticket
pub async fn delete_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id, "ticket")?;

    state
        .tickets
        .delete(id)
        .await
        .map_err(|e| e.store("Failed to delete ticket"))?;

    Ok(Json(MessageResponse {
        message: "Ticket deleted",
    }))
}
