//! # Raffle API Library
//!
//! Backend for a raffle and ticket-selling application:
//! - JSON HTTP endpoints for registration, login and CRUD on raffles,
//!   users and tickets
//! - PostgreSQL storage through repository traits
//! - A startup routine that waits for the database and ensures the
//!   superadmin account exists
//!
//! ## Architecture
//!
//! - **Domain Layer**: Core business entities and repository traits
//! - **Application Layer**: Authentication services and DTOs
//! - **Infrastructure Layer**: Database and metrics implementations
//! - **Presentation Layer**: HTTP handlers and middleware
//!
//! ## Module Structure
//!
//! ```text
//! raffle_api/
//! +-- config/         Configuration management
//! +-- domain/         Domain entities and traits
//! +-- application/    Application services and DTOs
//! +-- infrastructure/ Database, repositories and metrics
//! +-- presentation/   HTTP routes and middleware
//! +-- shared/         Common utilities (errors, passwords, retry)
//! +-- bootstrap       Startup readiness and superadmin creation
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Startup readiness and superadmin creation
pub mod bootstrap;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
