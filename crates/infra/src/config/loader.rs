//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Reads a `.env` file into the environment, if one exists
//! 2. Loads from environment variables when the API base URL is set there
//! 3. Otherwise falls back to the first config file found
//! 4. Otherwise uses the defaults (local backend, keychain session store)
//!
//! ## Environment Variables
//! - `CONEX_API_BASE_URL` (or `VITE_API_BASE_URL`): Backend origin
//! - `CONEX_API_TIMEOUT_SECS`: Per-request timeout; unset means none
//! - `CONEX_USER_AGENT`: User agent sent with every request
//! - `CONEX_SESSION_STORE`: `keychain`, `file` or `memory`
//! - `CONEX_SESSION_FILE`: Session file path for the `file` store
//! - `CONEX_KEYCHAIN_SERVICE`: Keychain service name
//! - `CONEX_VALIDATION_TTL_SECS`: Session validation TTL (default 300)
//! - `CONEX_REVALIDATE_INTERVAL_SECS`: Background revalidation period
//!
//! ## File Locations
//! `conex.toml`, `conex.json`, `config.toml` and `config.json` in the working
//! directory, its parent, and next to the executable.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use conex_common::auth::{FileSessionStore, KeychainSessionStore, MemorySessionStore, SessionStore};
use conex_domain::{
    ApiConfig, ClientConfig, ConexError, Result, SessionConfig, SessionStoreKind,
};

const BASE_URL_VARS: [&str; 2] = ["CONEX_API_BASE_URL", "VITE_API_BASE_URL"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `ConexError::Config` if an environment variable or the config
/// file found holds an invalid value
pub fn load() -> Result<ClientConfig> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    if base_url_from_env().is_some() {
        let config = load_from_env()?;
        tracing::info!(base_url = %config.api.base_url, "Configuration loaded from environment variables");
        return Ok(config);
    }

    match probe_config_paths() {
        Some(path) => load_from_file(Some(path)),
        None => {
            tracing::info!("No configuration found; using defaults");
            Ok(ClientConfig::default())
        }
    }
}

/// Load configuration from environment variables
///
/// The base URL is required; every other variable falls back to its
/// default.
///
/// # Errors
/// Returns `ConexError::Config` if the base URL is missing or a variable
/// cannot be parsed.
pub fn load_from_env() -> Result<ClientConfig> {
    let base_url = base_url_from_env().ok_or_else(|| {
        ConexError::Config(format!(
            "Missing required environment variable: {}",
            BASE_URL_VARS.join(" or ")
        ))
    })?;

    let defaults = SessionConfig::default();
    let session = SessionConfig {
        store: env_parse::<SessionStoreKind>("CONEX_SESSION_STORE")?.unwrap_or(defaults.store),
        file_path: optional_env("CONEX_SESSION_FILE").map_or(defaults.file_path, PathBuf::from),
        keychain_service: optional_env("CONEX_KEYCHAIN_SERVICE")
            .unwrap_or(defaults.keychain_service),
        validation_ttl_seconds: env_parse("CONEX_VALIDATION_TTL_SECS")?
            .unwrap_or(defaults.validation_ttl_seconds),
        revalidate_interval_seconds: env_parse("CONEX_REVALIDATE_INTERVAL_SECS")?,
    };

    Ok(ClientConfig {
        api: ApiConfig {
            base_url,
            timeout_seconds: env_parse("CONEX_API_TIMEOUT_SECS")?,
            user_agent: optional_env("CONEX_USER_AGENT"),
        },
        session,
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations. JSON and TOML are
/// supported, detected by extension. Sections and fields left out of the
/// file take their defaults.
///
/// # Errors
/// Returns `ConexError::Config` if the file is missing, unreadable or
/// invalid.
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ConexError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ConexError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ConexError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ConexError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ConexError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(ConexError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    const NAMES: [&str; 4] = ["conex.toml", "conex.json", "config.toml", "config.json"];

    let mut dirs = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        let parent = cwd.join("..");
        dirs.extend([cwd, parent]);
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter().flat_map(|dir| NAMES.iter().map(move |name| dir.join(name))).find(|p| p.exists())
}

/// Session store selected by configuration
pub fn session_store(config: &SessionConfig) -> Arc<dyn SessionStore> {
    tracing::debug!(store = ?config.store, "Creating session store");
    match config.store {
        SessionStoreKind::Keychain => Arc::new(KeychainSessionStore::new(&config.keychain_service)),
        SessionStoreKind::File => Arc::new(FileSessionStore::new(&config.file_path)),
        SessionStoreKind::Memory => Arc::new(MemorySessionStore::new()),
    }
}

fn base_url_from_env() -> Option<String> {
    BASE_URL_VARS.iter().find_map(|key| optional_env(key))
}

/// Non-empty environment variable
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Parse an optional environment variable
///
/// # Errors
/// Returns `ConexError::Config` if the variable is set but invalid.
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    optional_env(key)
        .map(|value| {
            value.parse::<T>().map_err(|e| ConexError::Config(format!("Invalid {key}: {e}")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ALL_VARS: [&str; 9] = [
        "CONEX_API_BASE_URL",
        "VITE_API_BASE_URL",
        "CONEX_API_TIMEOUT_SECS",
        "CONEX_USER_AGENT",
        "CONEX_SESSION_STORE",
        "CONEX_SESSION_FILE",
        "CONEX_KEYCHAIN_SERVICE",
        "CONEX_VALIDATION_TTL_SECS",
        "CONEX_REVALIDATE_INTERVAL_SECS",
    ];

    fn clear_env() {
        for key in ALL_VARS {
            std::env::remove_var(key);
        }
    }

    fn write_temp(contents: &str, extension: &str) -> PathBuf {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(contents.as_bytes()).unwrap();
        let path = temp_file.path().with_extension(extension);
        std::fs::copy(temp_file.path(), &path).unwrap();
        path
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("CONEX_API_BASE_URL", "https://ocr.example.com");
        std::env::set_var("CONEX_API_TIMEOUT_SECS", "30");
        std::env::set_var("CONEX_USER_AGENT", "conex-test/1.0");
        std::env::set_var("CONEX_SESSION_STORE", "file");
        std::env::set_var("CONEX_SESSION_FILE", "/tmp/conex-session.json");
        std::env::set_var("CONEX_KEYCHAIN_SERVICE", "Conex.test");
        std::env::set_var("CONEX_VALIDATION_TTL_SECS", "60");
        std::env::set_var("CONEX_REVALIDATE_INTERVAL_SECS", "900");

        let result = load_from_env();
        clear_env();

        let config = result.expect("config from env");
        assert_eq!(config.api.base_url, "https://ocr.example.com");
        assert_eq!(config.api.timeout_seconds, Some(30));
        assert_eq!(config.api.user_agent.as_deref(), Some("conex-test/1.0"));
        assert_eq!(config.session.store, SessionStoreKind::File);
        assert_eq!(config.session.file_path, PathBuf::from("/tmp/conex-session.json"));
        assert_eq!(config.session.keychain_service, "Conex.test");
        assert_eq!(config.session.validation_ttl_seconds, 60);
        assert_eq!(config.session.revalidate_interval_seconds, Some(900));
    }

    #[test]
    fn test_vite_variable_is_accepted_and_defaults_fill_in() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("VITE_API_BASE_URL", "http://localhost:8000");
        let result = load_from_env();
        clear_env();

        let config = result.expect("config from env");
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout_seconds, None);
        assert_eq!(config.session, SessionConfig::default());
    }

    #[test]
    fn test_load_from_env_missing_base_url() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, ConexError::Config(msg) if msg.contains("CONEX_API_BASE_URL")));
    }

    #[test]
    fn test_load_from_env_invalid_number() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("CONEX_API_BASE_URL", "http://localhost:8000");
        std::env::set_var("CONEX_VALIDATION_TTL_SECS", "five minutes");
        let result = load_from_env();
        clear_env();

        assert!(
            matches!(result, Err(ConexError::Config(msg)) if msg.contains("CONEX_VALIDATION_TTL_SECS"))
        );
    }

    #[test]
    fn test_load_from_env_invalid_store_kind() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("CONEX_API_BASE_URL", "http://localhost:8000");
        std::env::set_var("CONEX_SESSION_STORE", "vault");
        let result = load_from_env();
        clear_env();

        assert!(matches!(result, Err(ConexError::Config(_))));
    }

    #[test]
    fn test_load_from_file_toml() {
        let path = write_temp(
            r#"
[api]
base_url = "https://ocr.example.com"
timeout_seconds = 20

[session]
store = "memory"
"#,
            "toml",
        );

        let config = load_from_file(Some(path.clone())).expect("config from TOML");
        std::fs::remove_file(path).ok();

        assert_eq!(config.api.base_url, "https://ocr.example.com");
        assert_eq!(config.api.timeout_seconds, Some(20));
        assert_eq!(config.session.store, SessionStoreKind::Memory);
        assert_eq!(config.session.validation_ttl_seconds, 300);
    }

    #[test]
    fn test_load_from_file_json() {
        let path = write_temp(
            r#"{"api": {"base_url": "https://ocr.example.com"}, "session": {"validation_ttl_seconds": 120}}"#,
            "json",
        );

        let config = load_from_file(Some(path.clone())).expect("config from JSON");
        std::fs::remove_file(path).ok();

        assert_eq!(config.session.validation_ttl_seconds, 120);
        assert_eq!(config.session.store, SessionStoreKind::Keychain);
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/conex.json")));
        assert!(matches!(result, Err(ConexError::Config(_))));
    }

    #[test]
    fn test_load_from_file_invalid_json() {
        let path = write_temp(r#"{ "api": "#, "json");
        let result = load_from_file(Some(path.clone()));
        std::fs::remove_file(path).ok();

        assert!(matches!(result, Err(ConexError::Config(msg)) if msg.starts_with("Invalid JSON")));
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("api: {}", Path::new("conex.yaml"));
        assert!(result.is_err(), "Should fail with unsupported format");
    }

    #[test]
    fn test_memory_store_from_config() {
        let config = SessionConfig { store: SessionStoreKind::Memory, ..Default::default() };
        let store = session_store(&config);
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_file_store_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = SessionConfig {
            store: SessionStoreKind::File,
            file_path: dir.path().join("session.json"),
            ..Default::default()
        };
        let store = session_store(&config);
        store.save(&conex_common::auth::TokenPair::new("a", "r")).unwrap();

        let reopened = session_store(&config);
        assert_eq!(reopened.load().unwrap(), Some(conex_common::auth::TokenPair::new("a", "r")));
    }
}
