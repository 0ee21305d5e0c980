//! Session store trait and error types.

use async_trait::async_trait;
use std::fmt;

/// Errors that can occur during session store operations.
#[derive(Debug)]
pub enum SessionError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Session store connection error: {}", e),
            Self::OperationError(e) => write!(f, "Session store operation error: {}", e),
        }
    }
}

impl std::error::Error for SessionError {}

/// Result type for session store operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Key/value store holding short-lived client state such as issued tokens.
///
/// Unlike a cache, a session store fails closed: write errors are returned to
/// the caller so a login never reports success for a token that was not stored.
///
/// # Implementations
///
/// - [`crate::infrastructure::session::RedisSessionStore`] - Redis with TTL
/// - [`crate::infrastructure::session::MemorySessionStore`] - In-process map with TTL
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Stores a value under `key`, replacing any previous value.
    ///
    /// # Arguments
    ///
    /// - `key` - Session key (e.g. `token:42`)
    /// - `value` - Value to store
    /// - `persist` - When true the value must survive a process restart;
    ///   otherwise it may live only in process memory
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the value could not be written.
    async fn store_value(&self, key: &str, value: &str, persist: bool) -> SessionResult<()>;

    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key is absent or expired.
    async fn get_value(&self, key: &str) -> SessionResult<Option<String>>;

    /// Removes the value stored under `key`. Removing a missing key is not an error.
    async fn remove_value(&self, key: &str) -> SessionResult<()>;

    /// Checks if the backend is healthy.
    ///
    /// Used by the health endpoint to report session store status.
    async fn health_check(&self) -> bool;
}
