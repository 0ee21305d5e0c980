//! API route configuration.

use crate::api::handlers::{login_handler, session_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Public API routes.
///
/// # Endpoints
///
/// - `POST /login` - Verify credentials and issue a session token
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/login", post(login_handler))
}

/// API routes protected by bearer token authentication
/// ([`crate::api::middleware::auth`]).
///
/// # Endpoints
///
/// - `GET /session` - Claims of the presented session token
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/session", get(session_handler))
}
