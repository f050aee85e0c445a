//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_names: String,
    pub address: Option<String>,
    pub role: i32,
    pub is_registered: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft delete timestamp (None = active, Some = deleted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Check if user is soft deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Check if user is active (not deleted)
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// Data needed to persist a new account. The password is already hashed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_names: String,
    pub address: Option<String>,
    pub role: i32,
}

/// Partial profile update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_names: Option<String>,
    pub address: Option<String>,
    pub role: Option<i32>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_names.is_none()
            && self.address.is_none()
            && self.role.is_none()
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_names: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub role: i32,
    pub is_registered: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_names: user.last_names,
            address: user.address,
            role: user.role,
            is_registered: user.is_registered,
            created_at: user.created_at,
        }
    }
}
