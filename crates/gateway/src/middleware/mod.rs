//! Request middleware.

mod auth;

pub use auth::{auth_middleware, require_allowed, require_login, require_manager, CurrentUser};
