//! Shared building blocks for the Conex client crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: token types and the clock abstraction
//! - `runtime`: in-memory and file session stores
//! - `platform`: platform keychain integration
//! - `observability`: tracing (pulled in by `runtime`)
//! - `test-utils`: mock keychain and failing stores for downstream tests

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod time;

// Runtime tier
// --------------------------------------------------------------------
#[cfg(feature = "runtime")]
pub mod auth;

// Platform tier
// -------------------------------------------------------------------
#[cfg(feature = "platform")]
pub mod security;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(all(feature = "platform", any(feature = "test-utils", test)))]
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "platform")]
pub use auth::KeychainSessionStore;
#[cfg(feature = "runtime")]
pub use auth::{FileSessionStore, MemorySessionStore, SessionStore, SessionStoreError, TokenPair};
#[cfg(feature = "platform")]
pub use security::{KeychainError, KeychainProvider, SecretStore};
#[cfg(feature = "runtime")]
pub use time::MockClock;
#[cfg(feature = "foundation")]
pub use time::{Clock, SharedClock, SystemClock};
