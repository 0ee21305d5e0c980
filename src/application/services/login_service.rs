//! Password login: credential check, token issuing and login bookkeeping.

use metrics::counter;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::application::services::token_service::TokenService;
use crate::domain::entities::{Alert, Credentials, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::infrastructure::session::SessionStore;
use crate::utils::password;

/// Session store key prefix under which issued tokens are kept.
///
/// The store is shared by every client of the server, so each user's token
/// gets its own key ([`session_key`]).
pub const SESSION_TOKEN_KEY: &str = "token";

pub const LOGIN_SUCCESS_MESSAGE: &str = "Login success";

/// Shown for both an unknown email and a wrong password so the response does
/// not reveal which of the two was wrong.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email/password";

/// Session store key holding the token of `user_id`.
pub fn session_key(user_id: i64) -> String {
    format!("{}:{}", SESSION_TOKEN_KEY, user_id)
}

/// Result of a login attempt that did not fail with an infrastructure error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credentials matched; a token was issued and stored.
    Success {
        user_id: i64,
        token: String,
        alert: Alert,
    },
    /// Unknown email or wrong password. No token was issued.
    Rejected { alert: Alert },
}

impl LoginOutcome {
    pub fn alert(&self) -> &Alert {
        match self {
            Self::Success { alert, .. } | Self::Rejected { alert } => alert,
        }
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Success { token, .. } => Some(token),
            Self::Rejected { .. } => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Service handling password logins.
///
/// Generic over the repository and session store so it can be used with
/// concrete types in tests and with trait objects in [`crate::state::AppState`].
pub struct LoginService<U, S>
where
    U: UserRepository + ?Sized,
    S: SessionStore + ?Sized,
{
    users: Arc<U>,
    sessions: Arc<S>,
    tokens: TokenService,
}

impl<U, S> LoginService<U, S>
where
    U: UserRepository + ?Sized,
    S: SessionStore + ?Sized,
{
    /// Creates a new login service.
    ///
    /// # Arguments
    ///
    /// - `users` - repository used to look up accounts and record logins
    /// - `sessions` - store receiving issued tokens
    /// - `tokens` - signer for session tokens
    pub fn new(users: Arc<U>, sessions: Arc<S>, tokens: TokenService) -> Self {
        Self {
            users,
            sessions,
            tokens,
        }
    }

    /// Token signer used by this service.
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Checks `password` against a bcrypt `hash`.
    ///
    /// Runs on the blocking thread pool. A malformed hash or a panicked
    /// verification task counts as a mismatch.
    pub async fn verify_hash(&self, password: &str, hash: &str) -> bool {
        let (candidate, stored) = (password.to_owned(), hash.to_owned());

        match tokio::task::spawn_blocking(move || password::verify_hash(&candidate, &stored)).await
        {
            Ok(matches) => matches,
            Err(e) => {
                error!("Password verification task failed: {}", e);
                false
            }
        }
    }

    /// Authenticates `credentials` and, on success, issues a session token.
    ///
    /// # Flow
    ///
    /// 1. Look up exactly one user by email
    /// 2. Verify the password against the stored hash (awaited before branching)
    /// 3. Issue a token and store it under [`session_key`] with `persist = true`
    /// 4. Record the login in the user's history
    ///
    /// An unknown email and a wrong password both yield
    /// [`LoginOutcome::Rejected`] with the same alert, and neither issues a token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the lookup, signing, session write or
    /// history update fails. A failed session write stops before the history
    /// update.
    #[tracing::instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn sign_in(&self, credentials: Credentials) -> Result<LoginOutcome, AppError> {
        let Some(user) = self.users.find_by_email(&credentials.email).await? else {
            return Ok(self.reject("unknown email"));
        };

        if !self
            .verify_hash(&credentials.password, &user.password_hash)
            .await
        {
            return Ok(self.reject("password mismatch"));
        }

        let token = self.create_token(&user)?;

        self.sessions
            .store_value(&session_key(user.id), &token, true)
            .await?;

        self.users.update_login_history(user.id).await?;

        info!(user_id = user.id, "Login succeeded");
        counter!("login_attempts_total", "outcome" => "success").increment(1);

        Ok(LoginOutcome::Success {
            user_id: user.id,
            token,
            alert: Alert::success(LOGIN_SUCCESS_MESSAGE),
        })
    }

    /// Signs a session token for `user`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if signing fails.
    pub fn create_token(&self, user: &User) -> Result<String, AppError> {
        self.tokens.issue(user)
    }

    fn reject(&self, reason: &'static str) -> LoginOutcome {
        warn!(reason, "Login rejected");
        counter!("login_attempts_total", "outcome" => "rejected").increment(1);

        LoginOutcome::Rejected {
            alert: Alert::error(INVALID_CREDENTIALS_MESSAGE),
        }
    }
}
