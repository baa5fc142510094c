//! Raffle Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::application::dto::request::{CreateRaffleRequest, UpdateRaffleRequest};
use crate::application::dto::response::{MessageResponse, RaffleEnvelope, RaffleResponse};
use crate::domain::{NewRaffle, RaffleChanges};
use crate::presentation::http::extractors::{parse_id, JsonBody};
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// List all raffles
pub async fn list_raffles(
    State(state): State<AppState>,
) -> Result<Json<Vec<RaffleResponse>>, AppError> {
    let raffles = state
        .raffles
        .list()
        .await
        .map_err(|e| e.store("Failed to fetch raffles"))?;

    Ok(Json(raffles.into_iter().map(RaffleResponse::from).collect()))
}

/// Get a raffle by ID
pub async fn get_raffle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RaffleResponse>, AppError> {
    let id = parse_id(&id, "raffle")?;

    let raffle = state
        .raffles
        .find_by_id(id)
        .await
        .map_err(|e| e.store("Failed to fetch raffle"))?
        .ok_or_else(|| AppError::NotFound("Raffle not found".into()))?;

    Ok(Json(raffle.into()))
}

/// Create a raffle; the description becomes the prize
pub async fn create_raffle(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateRaffleRequest>,
) -> Result<(StatusCode, Json<RaffleEnvelope>), AppError> {
    body.validate().map_err(validation_error)?;

    let raffle = state
        .raffles
        .create(&NewRaffle {
            title: body.title.unwrap_or_default(),
            prize: body.description.unwrap_or_default(),
        })
        .await
        .map_err(|e| e.store("Failed to create raffle"))?;

    Ok((
        StatusCode::CREATED,
        Json(RaffleEnvelope {
            message: "Raffle created",
            raffle: raffle.into(),
        }),
    ))
}

/// Update a raffle's title and/or prize
pub async fn update_raffle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<UpdateRaffleRequest>,
) -> Result<Json<RaffleEnvelope>, AppError> {
    let id = parse_id(&id, "raffle")?;

    let changes = RaffleChanges {
        title: body.title,
        prize: body.description,
    };
    let raffle = state
        .raffles
        .update(id, &changes)
        .await
        .map_err(|e| e.store("Failed to update raffle"))?;

    Ok(Json(RaffleEnvelope {
        message: "Raffle updated",
        raffle: raffle.into(),
    }))
}

/// Delete a raffle
pub async fn delete_raffle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id, "raffle")?;

    state
        .raffles
        .delete(id)
        .await
        .map_err(|e| e.store("Failed to delete raffle"))?;

    Ok(Json(MessageResponse {
        message: "Raffle deleted",
    }))
}
