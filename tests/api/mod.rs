//! API endpoint tests

mod auth_tests;
mod bootstrap_tests;
mod raffle_tests;
mod user_tests;
