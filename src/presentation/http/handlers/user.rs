//! User Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use super::auth::registration_error;
use crate::application::dto::request::{RegisterRequest, UpdateUserRequest};
use crate::application::dto::response::{MessageResponse, UserEnvelope, UserResponse};
use crate::domain::UserChanges;
use crate::presentation::http::extractors::{parse_id, JsonBody};
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// List all users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state
        .users
        .list()
        .await
        .map_err(|e| e.store("Failed to fetch users"))?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get a user by ID
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let id = parse_id(&id, "user")?;

    let user = state
        .users
        .find_by_id(id)
        .await
        .map_err(|e| e.store("Failed to fetch user"))?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(Json(user.into()))
}

/// Create a user; same contract as registration
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<UserEnvelope>), AppError> {
    body.validate().map_err(validation_error)?;

    let user = state
        .auth
        .register(
            body.email.as_deref().unwrap_or_default(),
            body.name.as_deref().unwrap_or_default(),
            body.password.as_deref().unwrap_or_default(),
        )
        .await
        .map_err(|e| registration_error(e, "Failed to create user"))?;

    Ok((
        StatusCode::CREATED,
        Json(UserEnvelope {
            message: "User created",
            user: user.into(),
        }),
    ))
}

/// Update a user's name and/or email
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<UpdateUserRequest>,
) -> Result<Json<UserEnvelope>, AppError> {
    let id = parse_id(&id, "user")?;

    let changes = UserChanges {
        name: body.name,
        email: body.email,
    };
    let user = state
        .users
        .update(id, &changes)
        .await
        .map_err(|e| e.store("Failed to update user"))?;

    Ok(Json(UserEnvelope {
        message: "User updated",
        user: user.into(),
    }))
}

/// Delete a user
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id, "user")?;

    state
        .users
        .delete(id)
        .await
        .map_err(|e| e.store("Failed to delete user"))?;

    Ok(Json(MessageResponse {
        message: "User deleted",
    }))
}
