//! DTOs for the session introspection endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::services::Claims;
use crate::domain::entities::User;

/// The caller's account and the validity window of their bearer token.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user_id: i64,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub issued_at: usize,
    pub expires_at: usize,
}

impl SessionResponse {
    pub fn new(user: &User, claims: &Claims) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            last_login_at: user.last_login_at,
            issued_at: claims.iat,
            expires_at: claims.exp,
        }
    }
}
