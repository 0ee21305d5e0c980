//! Password hashing and verification with bcrypt.
//!
//! - [`hash_password`] hashes a plaintext password with a random salt at the
//!   given cost factor and returns the modular-crypt string (`$2b$10$...`)
//!   stored in `users.password_hash`.
//! - [`verify_hash`] checks a plaintext password against such a string using
//!   bcrypt's constant-time comparison.
//! - [`diagnostic_hash`] hashes a fixed known password so operators can check
//!   the hashing setup end to end.
//!
//! bcrypt is CPU-bound; async callers should run these functions on the
//! blocking pool (see [`crate::application::services::LoginService::verify_hash`]).

use serde_json::json;

use crate::error::AppError;

/// Cost factor used when none is configured.
pub const DEFAULT_COST: u32 = 10;

/// Lowest cost factor bcrypt accepts.
pub const MIN_COST: u32 = 4;

/// Highest cost factor bcrypt accepts.
pub const MAX_COST: u32 = 31;

/// Password hashed by [`diagnostic_hash`].
pub const DIAGNOSTIC_PASSWORD: &str = "696k2iyi";

/// Hashes a password at the given bcrypt cost factor (4..=31).
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the cost is out of range and
/// [`AppError::Internal`] if hashing fails.
pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    if !(MIN_COST..=MAX_COST).contains(&cost) {
        return Err(AppError::bad_request(
            "Invalid bcrypt cost",
            json!({ "cost": cost, "min": MIN_COST, "max": MAX_COST }),
        ));
    }

    bcrypt::hash(password, cost).map_err(|e| {
        AppError::internal("Failed to hash password", json!({ "reason": e.to_string() }))
    })
}

/// Returns true iff `hash` is a bcrypt hash of `password`.
///
/// A malformed hash never verifies.
pub fn verify_hash(password: &str, hash: &str) -> bool {
    match bcrypt::verify(password, hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!("Stored password hash could not be parsed: {}", e);
            false
        }
    }
}

/// Hashes [`DIAGNOSTIC_PASSWORD`] at [`DEFAULT_COST`] and logs the result.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if hashing fails.
pub fn diagnostic_hash() -> Result<String, AppError> {
    let hash = hash_password(DIAGNOSTIC_PASSWORD, DEFAULT_COST)?;
    tracing::info!(%hash, "Diagnostic password hash");
    Ok(hash)
}
