//! Credential & session gate.
//!
//! Verifies login credentials, issues and decodes signed session tokens and
//! makes the role-based access decisions that run before any business logic.
//! User account management lives here too since it shares the same rules.

pub mod gate;
pub mod service;
pub mod token;

pub use gate::AccessGate;
pub use service::{
    AuthService, Authenticator, LoginResponse, Registration, UserManager, UserService,
};
pub use token::{Claims, TokenService};
