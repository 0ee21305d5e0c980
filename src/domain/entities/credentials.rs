//! Login credentials submitted by a client.

use std::fmt;

/// Email and plaintext password submitted at login.
///
/// The `Debug` implementation redacts the password so credentials can be
/// logged safely.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Creates credentials. The email is trimmed and lowercased to match
    /// how addresses are stored.
    pub fn new(email: &str, password: impl Into<String>) -> Self {
        Self {
            email: email.trim().to_lowercase(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}
