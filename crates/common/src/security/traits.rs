//! Trait abstraction over secret storage
//!
//! Lets the keychain-backed session store run against the in-memory
//! `MockKeychainProvider` in tests, where the OS keychain is unavailable.

use super::keychain::{KeychainError, KeychainProvider};

/// Key/value secret storage namespaced by a service name
pub trait SecretStore: Send + Sync {
    /// Store or overwrite a secret.
    ///
    /// # Errors
    /// Returns `KeychainError::AccessFailed` if the backend rejects the write
    fn set_secret(&self, key: &str, value: &str) -> Result<(), KeychainError>;

    /// Read a secret.
    ///
    /// # Errors
    /// Returns `KeychainError::NotFound` if no value is stored under `key`
    fn get_secret(&self, key: &str) -> Result<String, KeychainError>;

    /// Remove a secret. Deleting a missing key succeeds.
    ///
    /// # Errors
    /// Returns `KeychainError::AccessFailed` if the backend rejects the delete
    fn delete_secret(&self, key: &str) -> Result<(), KeychainError>;
}

impl SecretStore for KeychainProvider {
    fn set_secret(&self, key: &str, value: &str) -> Result<(), KeychainError> {
        Self::set_secret(self, key, value)
    }

    fn get_secret(&self, key: &str) -> Result<String, KeychainError> {
        Self::get_secret(self, key)
    }

    fn delete_secret(&self, key: &str) -> Result<(), KeychainError> {
        Self::delete_secret(self, key)
    }
}
