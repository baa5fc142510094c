//! Authentication Handlers

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::application::dto::request::{LoginRequest, RegisterRequest};
use crate::application::dto::response::{LoginResponse, UserEnvelope};
use crate::application::services::AuthError;
use crate::presentation::http::extractors::JsonBody;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// Map auth failures for the register/create flows
pub(crate) fn registration_error(e: AuthError, message: &'static str) -> AppError {
    match e {
        AuthError::Repository(inner) => inner.store(message),
        e => AppError::Internal(e.to_string()),
    }
}

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<UserEnvelope>), AppError> {
    body.validate().map_err(validation_error)?;
    let (email, name, password) = (
        body.email.unwrap_or_default(),
        body.name.unwrap_or_default(),
        body.password.unwrap_or_default(),
    );

    let user = state
        .auth
        .register(&email, &name, &password)
        .await
        .map_err(|e| registration_error(e, "Failed to register user"))?;

    Ok((
        StatusCode::CREATED,
        Json(UserEnvelope {
            message: "User registered",
            user: user.into(),
        }),
    ))
}

/// Login with credentials
pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    body.validate().map_err(validation_error)?;
    let (email, password) = (body.email.unwrap_or_default(), body.password.unwrap_or_default());

    let token = state
        .auth
        .authenticate(&email, &password)
        .await
        .map_err(|e| match e {
            AuthError::UserNotFound => AppError::Unauthorized("User not found".into()),
            AuthError::InvalidPassword => AppError::Unauthorized("Incorrect password".into()),
            AuthError::Repository(inner) => inner.store("Failed to log in"),
            e => AppError::Internal(e.to_string()),
        })?;

    Ok(Json(LoginResponse {
        message: "Login successful",
        token,
    }))
}
