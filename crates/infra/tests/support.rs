//! Shared fixtures for the infra integration tests

use std::sync::Arc;

use conex_common::auth::{MemorySessionStore, TokenPair};
use conex_infra::ApiClient;
use serde_json::{json, Value};
use wiremock::MockServer;

pub const LOGIN: &str = "/api/v1/auth/login";
pub const REFRESH: &str = "/api/v1/auth/refresh";
pub const ME: &str = "/api/v1/auth/me";
pub const LOGOUT: &str = "/api/v1/auth/logout";

pub fn user_json(id: &str) -> Value {
    json!({
        "id": id,
        "email": format!("{id}@example.jp"),
        "username": id,
        "first_name": null,
        "last_name": null,
        "is_active": true,
        "is_admin": false,
        "company_id": "c1",
        "role": "member",
        "permissions": ["ocr_convert"],
        "created_at": "2024-03-01T09:00:00Z"
    })
}

pub fn token_json(access: &str, refresh: &str) -> Value {
    json!({
        "access_token": access,
        "refresh_token": refresh,
        "token_type": "bearer",
        "expires_in": 1800,
        "user": user_json("u1")
    })
}

pub fn client(server: &MockServer, store: &MemorySessionStore) -> ApiClient {
    ApiClient::builder()
        .base_url(server.uri())
        .session_store(Arc::new(store.clone()))
        .build()
        .expect("api client should build")
}

/// Store holding the `a1`/`r1` pair
pub fn logged_in_store() -> MemorySessionStore {
    MemorySessionStore::with_tokens(TokenPair::new("a1", "r1"))
}
