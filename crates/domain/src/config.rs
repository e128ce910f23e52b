//! Configuration structures
//!
//! Plain data; loading from environment or files lives in
//! `conex-infra::config`.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_KEYCHAIN_SERVICE, DEFAULT_SESSION_FILE,
    DEFAULT_VALIDATION_TTL_SECS,
};

/// Complete client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend origin, without the `/api/v1` prefix
    pub base_url: String,
    /// Per-request timeout; `None` leaves requests unbounded
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_API_BASE_URL.to_string(), timeout_seconds: None, user_agent: None }
    }
}

impl ApiConfig {
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

/// Where the token pair is persisted between runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStoreKind {
    /// Platform keychain (macOS Keychain, Windows Credential Manager, Secret
    /// Service)
    #[default]
    Keychain,
    /// JSON file on disk
    File,
    /// Process memory only; nothing survives a restart
    Memory,
}

impl std::str::FromStr for SessionStoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keychain" => Ok(Self::Keychain),
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown session store kind: {other}")),
        }
    }
}

/// Session persistence and revalidation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub store: SessionStoreKind,
    /// Used when `store` is `file`
    #[serde(default = "default_session_file")]
    pub file_path: PathBuf,
    /// Used when `store` is `keychain`
    #[serde(default = "default_keychain_service")]
    pub keychain_service: String,
    /// A session validated more recently than this is trusted without a
    /// network round-trip.
    #[serde(default = "default_validation_ttl")]
    pub validation_ttl_seconds: u64,
    /// Background revalidation period; `None` disables the task
    #[serde(default)]
    pub revalidate_interval_seconds: Option<u64>,
}

fn default_session_file() -> PathBuf {
    PathBuf::from(DEFAULT_SESSION_FILE)
}

fn default_keychain_service() -> String {
    DEFAULT_KEYCHAIN_SERVICE.to_string()
}

const fn default_validation_ttl() -> u64 {
    DEFAULT_VALIDATION_TTL_SECS
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store: SessionStoreKind::default(),
            file_path: default_session_file(),
            keychain_service: default_keychain_service(),
            validation_ttl_seconds: DEFAULT_VALIDATION_TTL_SECS,
            revalidate_interval_seconds: None,
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn validation_ttl(&self) -> Duration {
        Duration::from_secs(self.validation_ttl_seconds)
    }

    #[must_use]
    pub fn revalidate_interval(&self) -> Option<Duration> {
        self.revalidate_interval_seconds.filter(|s| *s > 0).map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = ClientConfig::default();
        assert_eq!(config.api.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.api.timeout(), None);
        assert_eq!(config.session.validation_ttl(), Duration::from_secs(300));
        assert_eq!(config.session.store, SessionStoreKind::Keychain);
    }

    #[test]
    fn partial_toml_like_json_fills_defaults() -> anyhow::Result<()> {
        let config: ClientConfig =
            serde_json::from_str(r#"{"api":{"base_url":"https://ocr.example.com"}}"#)?;
        assert_eq!(config.api.base_url, "https://ocr.example.com");
        assert_eq!(config.session, SessionConfig::default());
        Ok(())
    }

    #[test]
    fn zero_interval_disables_revalidation() {
        let session = SessionConfig { revalidate_interval_seconds: Some(0), ..Default::default() };
        assert_eq!(session.revalidate_interval(), None);
    }

    #[test]
    fn parses_store_kind() {
        assert_eq!("File".parse::<SessionStoreKind>(), Ok(SessionStoreKind::File));
        assert!("vault".parse::<SessionStoreKind>().is_err());
    }
}
