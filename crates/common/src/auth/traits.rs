//! Session persistence abstraction
//!
//! The API client reads the stored pair once at construction and writes it
//! only from token-issuing calls (login, refresh) and on logout, so the
//! operations are synchronous and coarse-grained.

use thiserror::Error;

use super::types::TokenPair;

/// Durable storage for the session token pair
pub trait SessionStore: Send + Sync {
    /// Read the stored pair, `None` when no session is persisted.
    ///
    /// # Errors
    /// Returns `SessionStoreError` if the backend cannot be read
    fn load(&self) -> Result<Option<TokenPair>, SessionStoreError>;

    /// Replace the stored pair.
    ///
    /// # Errors
    /// Returns `SessionStoreError` if the backend rejects the write
    fn save(&self, tokens: &TokenPair) -> Result<(), SessionStoreError>;

    /// Remove any stored pair (idempotent).
    ///
    /// # Errors
    /// Returns `SessionStoreError` if the backend rejects the delete
    fn clear(&self) -> Result<(), SessionStoreError>;
}

/// Session storage failures
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[cfg(feature = "platform")]
    #[error("Keychain error: {0}")]
    Keychain(#[from] crate::security::KeychainError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored session exists but cannot be parsed
    #[error("Corrupt session data: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Session store unavailable: {0}")]
    Unavailable(String),
}
