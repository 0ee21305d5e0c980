//! User-facing alert describing the outcome of an operation.

use serde::Serialize;

/// Severity of an [`Alert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Success,
    Error,
}

/// A message shown to the user, rendered by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub message: String,
    pub level: AlertLevel,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: AlertLevel::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: AlertLevel::Error,
        }
    }
}
