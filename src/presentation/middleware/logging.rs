//! Request Logging Middleware
//!
//! Tower tracing spans plus a per-request log line with the matched route,
//! status, latency and a copy of the JSON body with passwords masked.
//!
//! Only bodies with a known size under the copy limit are buffered. Everything
//! else reaches the handler untouched and is logged without a body.

use std::time::Instant;

use axum::{
    body::{to_bytes, Body, HttpBody},
    extract::{MatchedPath, Request},
    http::{HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use uuid::Uuid;

use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// Largest body copied into the log.
const MAX_LOGGED_BODY_BYTES: usize = 1024 * 1024;

const MASK: &str = "***";

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Create the tracing layer for HTTP requests
pub fn create_trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::DEBUG))
}

/// Log one line per request and record HTTP metrics.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned());

    let (req, logged_body) = if should_capture(&req) {
        let (parts, body) = req.into_parts();
        match to_bytes(body, MAX_LOGGED_BODY_BYTES).await {
            Ok(bytes) => {
                let logged = masked_body(&method, &bytes);
                (Request::from_parts(parts, Body::from(bytes)), logged)
            }
            // The stream is already consumed, so the handler could not read it either.
            Err(e) => {
                tracing::warn!(%request_id, error = %e, "Failed to read request body");
                return AppError::BadRequest("Request body unreadable".into()).into_response();
            }
        }
    } else {
        (req, None)
    };

    let mut response = next.run(req).await;
    let elapsed = start.elapsed();
    let status = response.status();

    tracing::info!(
        %request_id,
        method = %method,
        uri = %uri,
        route = route.as_deref().unwrap_or("-"),
        status = status.as_u16(),
        elapsed_ms = elapsed.as_millis() as u64,
        body = logged_body.as_deref().unwrap_or("-"),
        "Request handled"
    );

    metrics::record_http_request(
        method.as_str(),
        route.as_deref().unwrap_or("unmatched"),
        status.as_u16(),
        elapsed.as_secs_f64(),
    );

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Whether the body is worth copying: not a GET or HEAD, and bounded by the
/// copy limit according to its size hint.
pub fn should_capture(req: &Request) -> bool {
    if matches!(*req.method(), Method::GET | Method::HEAD) {
        return false;
    }

    req.body()
        .size_hint()
        .upper()
        .is_some_and(|len| len > 0 && len <= MAX_LOGGED_BODY_BYTES as u64)
}

/// JSON body as a log string, with a top-level `password` replaced by `***`.
///
/// Bodies of GET requests and anything that is not JSON are not logged.
pub fn masked_body(method: &Method, bytes: &[u8]) -> Option<String> {
    if *method == Method::GET || bytes.is_empty() {
        return None;
    }

    let mut value: Value = serde_json::from_slice(bytes).ok()?;
    if let Some(password) = value.as_object_mut().and_then(|o| o.get_mut("password")) {
        *password = Value::String(MASK.into());
    }
    Some(value.to_string())
}
