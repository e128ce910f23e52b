//! Error types used throughout the client

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Conex consumers
///
/// Lower layers keep their own error enums (`ApiError`, `SessionStoreError`);
/// this type is the single shape a UI or CLI needs to present a message.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ConexError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    /// Backend rejected the request; the message is the backend's `detail`
    /// or the HTTP status line.
    #[error("{0}")]
    Backend(String),

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConexError {
    /// Whether the error means the session is gone and the user must log in
    /// again.
    #[must_use]
    pub fn is_session_fatal(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}

/// Result type alias for Conex operations
pub type Result<T> = std::result::Result<T, ConexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_errors_display_message_verbatim() {
        let err = ConexError::Backend("Email already registered".to_string());
        assert_eq!(err.to_string(), "Email already registered");
    }

    #[test]
    fn serializes_with_type_tag() -> anyhow::Result<()> {
        let err = ConexError::Auth("session expired".to_string());
        let json = serde_json::to_value(&err)?;
        assert_eq!(json["type"], "Auth");
        assert_eq!(json["message"], "session expired");
        assert!(err.is_session_fatal());
        Ok(())
    }
}
