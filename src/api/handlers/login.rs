//! Handler for the login endpoint.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::login::{LoginRequest, LoginResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Verifies an email/password pair and issues a session token.
///
/// # Endpoint
///
/// `POST /api/login`
///
/// # Request Body
///
/// ```json
/// { "email": "bob@example.com", "password": "..." }
/// ```
///
/// # Response
///
/// **200 OK** on success:
///
/// ```json
/// {
///   "alert": { "message": "Login success", "level": "success" },
///   "user_id": 7,
///   "token": "eyJ0eXAiOiJKV1Qi...",
///   "expires_in": 3600
/// }
/// ```
///
/// **401 Unauthorized** for an unknown email or a wrong password, with the
/// same body in both cases:
///
/// ```json
/// { "alert": { "message": "Invalid email/password", "level": "error" } }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails and 500 if the database,
/// session store or token signing fails.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), AppError> {
    payload.validate()?;

    let outcome = state.login_service.sign_in(payload.into()).await?;

    let status = if outcome.is_success() {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    };

    let expires_in = state.login_service.tokens().ttl_seconds();

    Ok((status, Json(LoginResponse::from_outcome(outcome, expires_in))))
}
