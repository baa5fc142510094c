//! Health Check Handlers
//!
//! # Endpoints
//! - `GET /health` - Database round trip; 500 when the database is unreachable
//! - `GET /` - Liveness; never touches the database

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::time::Instant;

use crate::application::dto::response::MessageResponse;
use crate::startup::AppState;

/// Health check response
#[derive(Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum HealthResponse {
    Ok {
        status: &'static str,
        db: &'static str,
        /// Round-trip latency in milliseconds
        time: u64,
    },
    Failed {
        status: &'static str,
        db: &'static str,
        error: String,
    },
}

/// Database-backed health check
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();

    match state.probe.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse::Ok {
                status: "ok",
                db: "ok",
                time: start.elapsed().as_millis() as u64,
            }),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse::Failed {
                    status: "error",
                    db: "fail",
                    error: e.to_string(),
                }),
            )
        }
    }
}

/// Liveness endpoint
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Raffle API running",
    })
}
