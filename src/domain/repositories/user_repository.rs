//! Repository trait for user accounts and login history.

use crate::domain::entities::{LoginRecord, NewUser, User};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for user lookup and login bookkeeping.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds exactly one user by email address.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(user))` if an account with this email exists
    /// - `Ok(None)` otherwise
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Finds a user by database ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Records a successful login for the user.
    ///
    /// Appends a row to the login history and sets `last_login_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update_login_history(&self, user_id: i64) -> Result<(), AppError>;

    /// Lists the most recent logins of a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_login_history(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<LoginRecord>, AppError>;

    /// Creates a new user account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create_user(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Checks that the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be queried.
    async fn ping(&self) -> Result<(), AppError>;
}
