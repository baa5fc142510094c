//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **AuthService**: registration, credential checks, login tokens
//! - **TokenIssuer**: JWT signing and verification

pub mod auth_service;
pub mod token_service;

// Re-export auth service types
pub use auth_service::{hash_password_blocking, AuthError, AuthService, AuthServiceImpl};

// Re-export token types
pub use token_service::{Claims, TokenError, TokenIssuer};
