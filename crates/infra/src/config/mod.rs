//! Configuration loading
//!
//! Builds a [`conex_domain::ClientConfig`] from environment variables or
//! files, and the session store it selects.

pub mod loader;

// Re-export commonly used items
pub use loader::{load, load_from_env, load_from_file, probe_config_paths, session_store};
