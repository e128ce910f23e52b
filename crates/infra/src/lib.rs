//! # Conex Infrastructure
//!
//! I/O side of the Conex AI-OCR client.
//!
//! This crate contains:
//! - The authenticated backend client ([`ApiClient`]) and its endpoint groups
//! - The session state machine ([`AuthManager`]) with subscriptions and
//!   background revalidation
//! - The HTTP transport wrapper
//! - Configuration loading and tracing initialisation
//!
//! ## Architecture
//! - Domain types and errors come from `conex-domain`
//! - Session persistence and the clock come from `conex-common`
//! - Consumers hold an `Arc<ApiClient>` and an `Arc<AuthManager>`; they never
//!   touch the HTTP layer directly
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use conex_infra::{config, ApiClient, AuthManager};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = config::load()?;
//! let client = Arc::new(ApiClient::new(&cfg.api, config::session_store(&cfg.session))?);
//! let auth = Arc::new(AuthManager::from_config(client.clone(), &cfg.session));
//!
//! auth.initialize().await;
//! if !auth.is_authenticated() {
//!     auth.login("tanaka@example.jp", "password").await?;
//! }
//! let records = client.data().list(0, 100).await?;
//! # let _ = records;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;
pub mod session;

// Re-export commonly used items
pub use api::{ApiClient, ApiError, ApiErrorCategory, Blob, FilePart, MultipartForm, RequestBody};
pub use http::{HttpClient, HttpClientBuilder};
pub use observability::{init_tracing, LogFormat};
pub use session::{AuthBackend, AuthManager, AuthState, RevalidationHandle, Subscription};
