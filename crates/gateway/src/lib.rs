//! HTTP gateway for the stockroom inventory API.
//!
//! Hosts the axum router, the authentication middleware, request handlers
//! and the command-line entry points (serve, migrate, seed, bootstrap).

pub mod cli;
pub mod commands;
pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
