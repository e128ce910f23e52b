//! Integration tests for the session store backends
//!
//! Every backend must honour the same contract: `load` after `save` returns
//! the saved pair, `clear` is idempotent, and a fresh handle over the same
//! storage sees what a previous handle wrote.

use conex_common::auth::{
    FileSessionStore, KeychainSessionStore, MemorySessionStore, SessionStore, TokenPair,
};
use conex_common::testing::{FailingSessionStore, MockKeychainProvider};

fn exercise_contract(first: &dyn SessionStore, second: &dyn SessionStore) -> anyhow::Result<()> {
    assert_eq!(first.load()?, None);

    first.save(&TokenPair::new("access-1", "refresh-1"))?;
    assert_eq!(second.load()?, Some(TokenPair::new("access-1", "refresh-1")));

    second.save(&TokenPair::access_only("access-2"))?;
    let reloaded = first.load()?.ok_or_else(|| anyhow::anyhow!("session vanished"))?;
    assert_eq!(reloaded.access_token, "access-2");
    assert!(!reloaded.can_refresh());

    first.clear()?;
    first.clear()?;
    assert_eq!(second.load()?, None);
    Ok(())
}

#[test]
fn memory_store_contract() -> anyhow::Result<()> {
    let store = MemorySessionStore::new();
    exercise_contract(&store, &store.clone())
}

#[test]
fn file_store_contract() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("session.json");
    exercise_contract(&FileSessionStore::new(&path), &FileSessionStore::new(&path))
}

#[test]
fn keychain_store_contract() -> anyhow::Result<()> {
    let secrets = MockKeychainProvider::new("Conex.integration");
    exercise_contract(
        &KeychainSessionStore::with_secrets(secrets.clone()),
        &KeychainSessionStore::with_secrets(secrets),
    )
}

#[test]
fn failing_store_reports_errors() {
    let store = FailingSessionStore::new();
    assert!(store.load().is_err());
    assert!(store.save(&TokenPair::new("a", "r")).is_err());
    assert!(store.clear().is_err());

    let read_only = FailingSessionStore::read_only(TokenPair::new("a", "r"));
    assert!(matches!(read_only.load(), Ok(Some(_))));
    assert!(read_only.clear().is_err());
}
