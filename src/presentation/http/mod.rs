//! HTTP Presentation
//!
//! Routes, handlers and extractors for the JSON API.

pub mod extractors;
pub mod handlers;
pub mod routes;

pub use routes::create_router;
