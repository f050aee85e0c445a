//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - Unified error handling with HTTP mapping
//! - The JSON response envelope
//! - Configuration structures

pub mod config;
pub mod error;
pub mod response;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
pub use response::{ApiResponse, Created};

#[cfg(feature = "database")]
pub use error::unique_violation;
