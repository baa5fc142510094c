//! Custom Extractors
//!
//! Axum extractors and helpers for request parsing.

use axum::extract::FromRequest;

use crate::shared::error::AppError;

/// `axum::Json` with rejections reported through [`AppError`], so a malformed
/// body gets the same `{code, error}` shape as every other failure.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Parse a numeric path id, reporting `Invalid <entity> ID` on failure.
pub fn parse_id(raw: &str, entity: &str) -> Result<i32, AppError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| AppError::BadRequest(format!("Invalid {} ID", entity)))
}
