//! Handler for session introspection.

use axum::{Extension, Json, extract::State};
use serde_json::json;

use crate::api::dto::session::SessionResponse;
use crate::application::services::Claims;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the caller's session and the account it belongs to.
///
/// # Endpoint
///
/// `GET /api/session`
///
/// # Authentication
///
/// Requires `Authorization: Bearer <token>`; the claims are placed in request
/// extensions by [`crate::api::middleware::auth::layer`].
///
/// # Response
///
/// ```json
/// {
///   "user_id": 7,
///   "email": "bob@example.com",
///   "name": "Bob",
///   "last_login_at": "2025-01-16T14:20:11Z",
///   "issued_at": 1700000000,
///   "expires_at": 1700003600
/// }
/// ```
///
/// # Errors
///
/// Returns `401 Unauthorized` if the account named by the token no longer exists.
pub async fn session_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<SessionResponse>, AppError> {
    let user = state.users.find_by_id(claims.id).await?.ok_or_else(|| {
        AppError::unauthorized("Unauthorized", json!({ "reason": "Account no longer exists" }))
    })?;

    Ok(Json(SessionResponse::new(&user, &claims)))
}
