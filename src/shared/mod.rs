//! Shared Utilities
//!
//! Common utilities used across all layers.

pub mod error;
pub mod password;
pub mod retry;
pub mod validation;
