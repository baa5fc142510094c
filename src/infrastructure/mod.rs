//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - Database pool, migrations and query instrumentation (PostgreSQL)
//! - Repository implementations
//! - Prometheus metrics

pub mod database;
pub mod metrics;
pub mod repositories;
