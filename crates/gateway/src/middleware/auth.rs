//! Authentication and role-gate middleware.
//!
//! `auth_middleware` turns the bearer token into a [`CurrentUser`] extension.
//! The `require_*` layers run after it and apply the access gate.

use std::ops::Deref;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};

use auth_service::Claims;
use common::{AppError, AppResult};
use domain::BEARER_TOKEN_PREFIX;

use crate::state::AppState;

/// Authenticated caller, decoded from the session token.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Claims);

impl Deref for CurrentUser {
    type Target = Claims;

    fn deref(&self) -> &Claims {
        &self.0
    }
}

/// Validate the bearer token.
///
/// A missing or malformed header is 401; a token that fails verification
/// or has expired is 403.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(&request)?;

    let claims = state.tokens.decode(token).ok_or_else(|| {
        tracing::warn!(path = %request.uri().path(), "Invalid or expired token");
        AppError::Forbidden
    })?;

    request.extensions_mut().insert(CurrentUser(claims));
    Ok(next.run(request).await)
}

/// Require claims that identify a user.
pub async fn require_login(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    state.gate.require_login(current_user(&request)?)?;
    Ok(next.run(request).await)
}

/// Require a role on the configured allow-list.
pub async fn require_allowed(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    state.gate.authorize(current_user(&request)?)?;
    Ok(next.run(request).await)
}

/// Require the manager role.
pub async fn require_manager(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    state.gate.authorize_manager(current_user(&request)?)?;
    Ok(next.run(request).await)
}

fn current_user(request: &Request<Body>) -> AppResult<&CurrentUser> {
    request
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::Unauthorized)
}

/// Extract the bearer token from the Authorization header.
fn extract_token(request: &Request<Body>) -> AppResult<&str> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!(path = %request.uri().path(), "Missing Authorization header");
            AppError::Unauthorized
        })?;

    match header.strip_prefix(BEARER_TOKEN_PREFIX) {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => {
            tracing::warn!(path = %request.uri().path(), "Malformed Authorization header");
            Err(AppError::Unauthorized)
        }
    }
}
