//! API-specific error types
//!
//! Every `ApiClient` operation fails with [`ApiError`]. Backend rejections
//! keep the HTTP status so callers can branch on it; the message is what a
//! user should see.

use reqwest::StatusCode;
use thiserror::Error;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// 401/403 or no session at all
    Authentication,
    /// 429
    RateLimit,
    /// 5xx
    Server,
    /// Other 4xx
    Client,
    /// Connection failures and timeouts
    Network,
    /// Encoding, decoding and configuration problems on this side
    Local,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response. `message` is the backend `detail` when present,
    /// otherwise the status line (`HTTP 404 Not Found`).
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Failed to encode request: {0}")]
    Encode(String),

    /// No usable session: no access token or no refresh token to renew it
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    pub(crate) fn http(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Http { status: status.as_u16(), message: message.into() }
    }

    /// Get the error category for this error
    #[must_use]
    pub const fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Http { status: 401 | 403, .. } | Self::NotAuthenticated => {
                ApiErrorCategory::Authentication
            }
            Self::Http { status: 429, .. } => ApiErrorCategory::RateLimit,
            Self::Http { status, .. } if *status >= 500 => ApiErrorCategory::Server,
            Self::Http { .. } => ApiErrorCategory::Client,
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Decode(_) | Self::Encode(_) | Self::Config(_) => ApiErrorCategory::Local,
        }
    }

    /// HTTP status of a backend rejection
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The session was rejected even after a refresh; the user has to log
    /// in again.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401, .. } | Self::NotAuthenticated)
    }

    /// Worth retrying later without changing the request
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self.category(),
            ApiErrorCategory::RateLimit | ApiErrorCategory::Server | ApiErrorCategory::Network
        )
    }
}
