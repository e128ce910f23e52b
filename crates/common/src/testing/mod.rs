//! Testing utilities
//!
//! - **[`mocks`]**: in-memory keychain and a session store that always fails
//!
//! `MockClock` lives in [`crate::time`] and is re-exported here.

pub mod mocks;

pub use mocks::{FailingSessionStore, MockKeychainProvider};

pub use crate::time::MockClock;
