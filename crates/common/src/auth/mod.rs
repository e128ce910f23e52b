//! Session token persistence
//!
//! ```text
//! ┌──────────────────┐
//! │  SessionStore    │  load / save / clear a TokenPair
//! └────────┬─────────┘
//!          ├──► KeychainSessionStore  (platform keychain, default)
//!          ├──► FileSessionStore      (JSON file, 0600)
//!          └──► MemorySessionStore    (process memory)
//! ```

pub mod file_store;
#[cfg(feature = "platform")]
pub mod keychain;
pub mod memory;
pub mod traits;
pub mod types;

pub use file_store::FileSessionStore;
#[cfg(feature = "platform")]
pub use keychain::KeychainSessionStore;
pub use memory::MemorySessionStore;
pub use traits::{SessionStore, SessionStoreError};
pub use types::TokenPair;

/// Persisted key of the access token
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Persisted key of the refresh token
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
