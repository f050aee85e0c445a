//! Role-based access decisions over decoded claims.

use std::sync::Arc;

use common::{AppError, AppResult};
use domain::RolePolicy;

use crate::token::Claims;

/// Pure authorization checks against the startup role policy.
#[derive(Clone)]
pub struct AccessGate {
    policy: Arc<RolePolicy>,
}

impl AccessGate {
    pub fn new(policy: Arc<RolePolicy>) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RolePolicy {
        &self.policy
    }

    /// Allow only roles on the configured allow-list.
    pub fn authorize(&self, claims: &Claims) -> AppResult<()> {
        if self.policy.is_allowed(claims.role) {
            return Ok(());
        }
        tracing::warn!(user_id = claims.id, role = claims.role, "Role not on allow-list");
        Err(AppError::Forbidden)
    }

    /// Allow only the manager tier, by exact match.
    pub fn authorize_manager(&self, claims: &Claims) -> AppResult<()> {
        if self.policy.is_manager(claims.role) {
            return Ok(());
        }
        tracing::warn!(user_id = claims.id, role = claims.role, "Manager role required");
        Err(AppError::Forbidden)
    }

    /// Reject claims that identify nobody.
    pub fn require_login(&self, claims: &Claims) -> AppResult<()> {
        if !claims.username.is_empty() || claims.id > 0 {
            return Ok(());
        }
        tracing::warn!("Claims carry no identity");
        Err(AppError::Forbidden)
    }
}
