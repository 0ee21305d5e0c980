//! DTOs for the login endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::LoginOutcome;
use crate::domain::entities::{Alert, Credentials};

/// Login form submitted by the client.
#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 256, message = "Password must not be empty"))]
    pub password: String,
}

impl From<LoginRequest> for Credentials {
    fn from(req: LoginRequest) -> Self {
        Credentials::new(&req.email, req.password)
    }
}

/// Login result: the alert to display and, on success, the session token.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub alert: Alert,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
}

impl LoginResponse {
    pub fn from_outcome(outcome: LoginOutcome, expires_in: u64) -> Self {
        match outcome {
            LoginOutcome::Success {
                user_id,
                token,
                alert,
            } => Self {
                alert,
                user_id: Some(user_id),
                token: Some(token),
                expires_in: Some(expires_in),
            },
            LoginOutcome::Rejected { alert } => Self {
                alert,
                user_id: None,
                token: None,
                expires_in: None,
            },
        }
    }
}
