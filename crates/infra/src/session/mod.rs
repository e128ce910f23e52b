//! Session management
//!
//! [`AuthManager`] tracks whether the user is logged in, re-validates the
//! session against the backend and pushes every change to subscribers.

pub mod backend;
pub mod manager;
pub mod revalidation;
pub mod state;
pub mod subscribers;

pub use backend::AuthBackend;
pub use manager::AuthManager;
pub use revalidation::RevalidationHandle;
pub use state::AuthState;
pub use subscribers::Subscription;
