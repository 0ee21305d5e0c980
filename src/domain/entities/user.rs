//! User entity and login history records.

use chrono::{DateTime, Utc};

/// A stored user account.
///
/// `password_hash` holds a bcrypt digest and is never serialized into tokens
/// or API responses.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Input data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
}

impl NewUser {
    /// Creates a new user input. The email is trimmed and lowercased.
    pub fn new(email: &str, password_hash: String, name: Option<String>) -> Self {
        Self {
            email: email.trim().to_lowercase(),
            password_hash,
            name,
        }
    }
}

/// A single successful login.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct LoginRecord {
    pub id: i64,
    pub user_id: i64,
    pub logged_in_at: DateTime<Utc>,
}
