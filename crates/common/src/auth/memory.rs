//! In-process session storage

use std::sync::Arc;

use parking_lot::RwLock;

use super::traits::{SessionStore, SessionStoreError};
use super::types::TokenPair;

/// Session store kept in memory
///
/// Clones share the same slot, so a second client built from a clone sees
/// what the first one persisted, the way two page loads share browser
/// storage.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    slot: Arc<RwLock<Option<TokenPair>>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a session
    #[must_use]
    pub fn with_tokens(tokens: TokenPair) -> Self {
        Self { slot: Arc::new(RwLock::new(Some(tokens))) }
    }

    /// Current contents, for assertions
    #[must_use]
    pub fn snapshot(&self) -> Option<TokenPair> {
        self.slot.read().clone()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<TokenPair>, SessionStoreError> {
        Ok(self.slot.read().clone())
    }

    fn save(&self, tokens: &TokenPair) -> Result<(), SessionStoreError> {
        *self.slot.write() = Some(tokens.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        *self.slot.write() = None;
        Ok(())
    }
}
