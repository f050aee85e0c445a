//! Application services of the gate.

mod auth_service;
mod user_service;

pub use auth_service::{AuthService, Authenticator, LoginResponse, Registration};
pub use user_service::{UserManager, UserService};
