//! Client constants
//!
//! Endpoint paths of the OCR backend and the defaults the client falls back
//! to when configuration leaves a value unset.

// Defaults
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_KEYCHAIN_SERVICE: &str = "Conex.ocr";
pub const DEFAULT_SESSION_FILE: &str = "conex-session.json";
/// Sessions validated within this window are not re-validated on start.
pub const DEFAULT_VALIDATION_TTL_SECS: u64 = 300;

// Auth endpoints
pub const AUTH_LOGIN: &str = "/api/v1/auth/login";
pub const AUTH_REGISTER: &str = "/api/v1/auth/register";
pub const AUTH_REGISTER_WITH_COMPANY: &str = "/api/v1/auth/register-with-company";
pub const AUTH_PROVISIONAL_REGISTER: &str = "/api/v1/auth/provisional-register";
pub const AUTH_VERIFY_EMAIL: &str = "/api/v1/auth/verify-email";
pub const AUTH_COMPLETE_REGISTRATION: &str = "/api/v1/auth/complete-registration";
pub const AUTH_REFRESH: &str = "/api/v1/auth/refresh";
pub const AUTH_ME: &str = "/api/v1/auth/me";
pub const AUTH_PROFILE: &str = "/api/v1/auth/profile";
pub const AUTH_LOGOUT: &str = "/api/v1/auth/logout";

// Resource prefixes
pub const FILES: &str = "/api/v1/files";
pub const CONVERSION: &str = "/api/v1/conversion";
pub const DATA: &str = "/api/v1/data";
pub const COMPANIES: &str = "/api/v1/companies";
pub const BILLING_HISTORY: &str = "/api/v1/billing-history";
