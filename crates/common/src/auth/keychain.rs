//! Session storage in the platform keychain
//!
//! The two tokens live in separate entries named `access_token` and
//! `refresh_token` under the configured service.

use tracing::debug;

use super::traits::{SessionStore, SessionStoreError};
use super::types::TokenPair;
use super::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use crate::security::{KeychainError, KeychainProvider, SecretStore};

/// `SessionStore` backed by a [`SecretStore`], the OS keychain by default
#[derive(Debug, Clone)]
pub struct KeychainSessionStore<S = KeychainProvider> {
    secrets: S,
}

impl KeychainSessionStore<KeychainProvider> {
    /// Store under the given keychain service name
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { secrets: KeychainProvider::new(service_name) }
    }
}

impl<S: SecretStore> KeychainSessionStore<S> {
    /// Store on top of an arbitrary secret backend
    pub const fn with_secrets(secrets: S) -> Self {
        Self { secrets }
    }

    fn read_optional(&self, key: &str) -> Result<Option<String>, KeychainError> {
        match self.secrets.get_secret(key) {
            Ok(value) => Ok(Some(value)),
            Err(KeychainError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl<S: SecretStore> SessionStore for KeychainSessionStore<S> {
    fn load(&self) -> Result<Option<TokenPair>, SessionStoreError> {
        let Some(access_token) = self.read_optional(ACCESS_TOKEN_KEY)? else {
            debug!("No access token in keychain");
            return Ok(None);
        };
        let refresh_token = self.read_optional(REFRESH_TOKEN_KEY)?;

        Ok(Some(TokenPair { access_token, refresh_token }))
    }

    fn save(&self, tokens: &TokenPair) -> Result<(), SessionStoreError> {
        self.secrets.set_secret(ACCESS_TOKEN_KEY, &tokens.access_token)?;
        match &tokens.refresh_token {
            Some(refresh) => self.secrets.set_secret(REFRESH_TOKEN_KEY, refresh)?,
            None => self.secrets.delete_secret(REFRESH_TOKEN_KEY)?,
        }
        debug!("Session tokens stored in keychain");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        self.secrets.delete_secret(ACCESS_TOKEN_KEY)?;
        self.secrets.delete_secret(REFRESH_TOKEN_KEY)?;
        debug!("Session tokens removed from keychain");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockKeychainProvider;

    #[test]
    fn round_trips_through_separate_entries() {
        let secrets = MockKeychainProvider::new("Conex.test");
        let store = KeychainSessionStore::with_secrets(secrets.clone());

        store.save(&TokenPair::new("access-1", "refresh-1")).unwrap();

        assert_eq!(secrets.get_secret("access_token").unwrap(), "access-1");
        assert_eq!(secrets.get_secret("refresh_token").unwrap(), "refresh-1");
        assert_eq!(store.load().unwrap(), Some(TokenPair::new("access-1", "refresh-1")));
    }

    #[test]
    fn missing_access_token_means_no_session() {
        let secrets = MockKeychainProvider::new("Conex.test");
        secrets.set_secret("refresh_token", "orphan").unwrap();
        let store = KeychainSessionStore::with_secrets(secrets);

        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn clear_removes_both_entries() {
        let secrets = MockKeychainProvider::new("Conex.test");
        let store = KeychainSessionStore::with_secrets(secrets.clone());
        store.save(&TokenPair::new("a", "r")).unwrap();

        store.clear().unwrap();
        store.clear().unwrap();

        assert!(!secrets.secret_exists("access_token"));
        assert!(!secrets.secret_exists("refresh_token"));
    }
}
