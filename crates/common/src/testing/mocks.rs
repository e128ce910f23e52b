//! Mock implementations of the storage traits

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::auth::{SessionStore, SessionStoreError, TokenPair};
use crate::security::{KeychainError, SecretStore};

/// In-memory stand-in for the platform keychain
///
/// Clones share the same entries.
#[derive(Debug, Clone)]
pub struct MockKeychainProvider {
    entries: Arc<Mutex<HashMap<String, String>>>,
    service_name: String,
}

impl MockKeychainProvider {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { entries: Arc::new(Mutex::new(HashMap::new())), service_name: service_name.into() }
    }

    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    #[must_use]
    pub fn secret_exists(&self, key: &str) -> bool {
        self.entries.lock().contains_key(key)
    }
}

impl Default for MockKeychainProvider {
    fn default() -> Self {
        Self::new("Conex.test")
    }
}

impl SecretStore for MockKeychainProvider {
    fn set_secret(&self, key: &str, value: &str) -> Result<(), KeychainError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get_secret(&self, key: &str) -> Result<String, KeychainError> {
        self.entries.lock().get(key).cloned().ok_or(KeychainError::NotFound)
    }

    fn delete_secret(&self, key: &str) -> Result<(), KeychainError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// Session store whose every operation fails
///
/// Exercises the paths where persistence breaks but the in-memory session
/// must still be updated (logout) or the error surfaced (login).
#[derive(Debug, Clone, Default)]
pub struct FailingSessionStore {
    /// Pair returned by `load`; `None` makes `load` fail as well.
    pub preloaded: Option<TokenPair>,
}

impl FailingSessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `tokens` successfully but fails every write
    #[must_use]
    pub const fn read_only(tokens: TokenPair) -> Self {
        Self { preloaded: Some(tokens) }
    }

    fn error() -> SessionStoreError {
        SessionStoreError::Unavailable("store disabled for test".to_string())
    }
}

impl SessionStore for FailingSessionStore {
    fn load(&self) -> Result<Option<TokenPair>, SessionStoreError> {
        self.preloaded.clone().map(Some).ok_or_else(Self::error)
    }

    fn save(&self, _tokens: &TokenPair) -> Result<(), SessionStoreError> {
        Err(Self::error())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        Err(Self::error())
    }
}
