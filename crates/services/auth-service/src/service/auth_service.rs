//! Authentication service - login and account registration.
//!
//! Uses the domain Password value object for hashing and verification.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

use common::{AppError, AppResult};
use domain::{NewUser, Password, RolePolicy, User, UserResponse, MIN_USERNAME_LENGTH};
use infra::UserRepository;

use crate::token::TokenService;

/// Successful login payload.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// `"Bearer <jwt>"`
    pub token: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Account registration request with a plain-text password.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_names: String,
    pub address: Option<String>,
    /// Requested tier; the policy's default tier when absent
    pub role: Option<i32>,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange a username or email plus password for a session token.
    ///
    /// An identifier containing `@` is matched against the lowercased email,
    /// anything else against the username. `NotFound` when no visible user
    /// matches, `InvalidCredentials` when the password does not.
    async fn login(&self, identifier: &str, password: &str) -> AppResult<LoginResponse>;

    /// Create an account on behalf of `requester_role`.
    async fn register(&self, requester_role: i32, registration: Registration) -> AppResult<User>;
}

pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    tokens: TokenService,
    policy: Arc<RolePolicy>,
}

impl Authenticator {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: TokenService,
        policy: Arc<RolePolicy>,
    ) -> Self {
        Self {
            users,
            tokens,
            policy,
        }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn login(&self, identifier: &str, password: &str) -> AppResult<LoginResponse> {
        let identifier = identifier.trim();
        let user = if identifier.contains('@') {
            self.users.find_by_email(&identifier.to_lowercase()).await?
        } else {
            self.users.find_by_username(identifier).await?
        };

        let user = user.ok_or_else(|| {
            tracing::warn!("Login failed: unknown user");
            AppError::not_found("User")
        })?;

        if !Password::from_hash(&user.password_hash).verify(password) {
            tracing::warn!(user_id = user.id, "Login failed: wrong password");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user)?;
        tracing::info!(user_id = user.id, "User logged in");

        Ok(LoginResponse {
            token,
            expires_in: self.tokens.expiration_hours() * domain::SECONDS_PER_HOUR,
            user: UserResponse::from(user),
        })
    }

    async fn register(&self, requester_role: i32, registration: Registration) -> AppResult<User> {
        let role = registration.role.unwrap_or(self.policy.default_role());
        self.policy.can_grant(requester_role, role)?;

        let username = registration.username.trim().to_string();
        if username.chars().count() < MIN_USERNAME_LENGTH {
            return Err(AppError::validation(format!(
                "Username must be at least {} characters",
                MIN_USERNAME_LENGTH
            )));
        }
        if username.contains('@') {
            return Err(AppError::validation("Username cannot contain '@'"));
        }

        let password_hash = Password::new(&registration.password)?.into_string();

        let user = self
            .users
            .create(NewUser {
                username,
                email: registration.email.trim().to_lowercase(),
                password_hash,
                first_name: registration.first_name,
                last_names: registration.last_names,
                address: registration.address,
                role,
            })
            .await?;

        tracing::info!(user_id = user.id, role, "User registered");
        Ok(user)
    }
}
