//! User entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use atelier_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role.clone(),
        }
    }
}

/// DTO for creating a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
}

/// Self-service account changes. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateCredentials {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password_hash: Option<String>,
}
