//! Session token issuing and validation.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::entities::User;
use crate::error::AppError;

/// Lifetime of a session token when none is configured.
pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 3600;

/// Claims signed into every session token.
///
/// Only the user id and the validity window are embedded; profile fields and
/// the password hash never leave the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id (`users.id`).
    pub id: i64,
    /// Issued-at (Unix timestamp, seconds).
    pub iat: usize,
    /// Expiry (Unix timestamp, seconds).
    pub exp: usize,
}

/// Signs and validates HS256 session tokens with a server-side secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_seconds: u64,
}

impl TokenService {
    /// Creates a token service.
    ///
    /// # Arguments
    ///
    /// - `secret` - HMAC key, loaded from `JWT_SECRET`
    /// - `ttl_seconds` - token lifetime, loaded from `TOKEN_TTL_SECONDS`
    pub fn new(secret: &str, ttl_seconds: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds,
        }
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// Issues a token for `user`, valid from now for the configured TTL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if signing fails.
    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        self.issue_at(user, Utc::now().timestamp().max(0) as usize)
    }

    /// Issues a token for `user` with an explicit issued-at timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if signing fails.
    pub fn issue_at(&self, user: &User, issued_at: usize) -> Result<String, AppError> {
        let claims = Claims {
            id: user.id,
            iat: issued_at,
            exp: issued_at + self.ttl_seconds as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            AppError::internal("Failed to sign token", json!({ "reason": e.to_string() }))
        })
    }

    /// Validates the signature and expiry of `token` and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is malformed, signed
    /// with another secret, or expired.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token rejected: {}", e);
                AppError::unauthorized(
                    "Unauthorized",
                    json!({ "reason": "Invalid or expired token" }),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User {
            id: 42,
            email: "alice@example.com".to_string(),
            password_hash: "$2b$10$abcdefghijklmnopqrstuv".to_string(),
            name: Some("Alice".to_string()),
            created_at: Utc::now(),
            last_login_at: None,
        }
    }

    fn now() -> usize {
        Utc::now().timestamp() as usize
    }

    #[test]
    fn test_issue_and_decode() {
        let service = TokenService::new("test-secret", DEFAULT_TOKEN_TTL_SECONDS);

        let token = service.issue(&test_user()).unwrap();
        let claims = service.decode(&token).unwrap();

        assert!(!token.is_empty());
        assert_eq!(claims.id, 42);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_issue_at_fixes_window() {
        let service = TokenService::new("test-secret", 3600);
        let issued_at = now();

        let token = service.issue_at(&test_user(), issued_at).unwrap();
        let claims = service.decode(&token).unwrap();

        assert_eq!(
            claims,
            Claims {
                id: 42,
                iat: issued_at,
                exp: issued_at + 3600,
            }
        );
    }

    #[test]
    fn test_token_does_not_embed_profile() {
        let service = TokenService::new("test-secret", 3600);
        let user = test_user();

        let token = service.issue(&user).unwrap();
        let claims = service.decode(&token).unwrap();
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json.as_object().unwrap().len(), 3);
        assert!(json.get("password_hash").is_none());
        assert!(json.get("email").is_none());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = TokenService::new("secret-a", 3600);
        let verifier = TokenService::new("secret-b", 3600);

        let token = issuer.issue(&test_user()).unwrap();

        assert!(matches!(
            verifier.decode(&token),
            Err(AppError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = TokenService::new("test-secret", 3600);

        let token = service.issue_at(&test_user(), now() - 7200).unwrap();

        assert!(matches!(
            service.decode(&token),
            Err(AppError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        let service = TokenService::new("test-secret", 3600);

        assert!(service.decode("not.a.token").is_err());
        assert!(service.decode("").is_err());
    }
}
