//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use tower::ServiceBuilder;

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::{create_catch_panic_layer, create_trace_layer, log_requests};
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .merge(raffle_routes())
        .merge(user_routes())
        .merge(ticket_routes())
        // Outermost first; panics are caught inside the request logger so they are still logged
        .layer(
            ServiceBuilder::new()
                .layer(create_trace_layer())
                .layer(middleware::from_fn(log_requests))
                .layer(create_catch_panic_layer()),
        )
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

fn raffle_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/raffles",
            get(handlers::raffle::list_raffles).post(handlers::raffle::create_raffle),
        )
        .route(
            "/raffles/{id}",
            get(handlers::raffle::get_raffle)
                .put(handlers::raffle::update_raffle)
                .delete(handlers::raffle::delete_raffle),
        )
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(handlers::user::list_users).post(handlers::user::create_user),
        )
        .route(
            "/users/{id}",
            get(handlers::user::get_user)
                .put(handlers::user::update_user)
                .delete(handlers::user::delete_user),
        )
}

fn ticket_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/tickets",
            get(handlers::ticket::list_tickets).post(handlers::ticket::create_ticket),
        )
        .route(
            "/tickets/{id}",
            get(handlers::ticket::get_ticket)
                .put(handlers::ticket::update_ticket)
                .delete(handlers::ticket::delete_ticket),
        )
}
