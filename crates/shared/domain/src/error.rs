//! Errors raised by pure domain rules.
//!
//! Lookups and uniqueness live in the storage layer, so the only failures
//! here are bad input, password handling and role grants.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input breaks a rule: negative amount, unknown role tier, bad config list
    #[error("Validation error: {0}")]
    Validation(String),

    /// Password too short or not hashable
    #[error("Password error: {0}")]
    Password(String),

    /// Requested role tier cannot be granted by the requester
    #[error("Forbidden")]
    Forbidden,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    pub fn password(msg: impl Into<String>) -> Self {
        DomainError::Password(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
