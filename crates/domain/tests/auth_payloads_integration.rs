//! Decoding of complete auth payloads as the backend sends them
//!
//! **Coverage:**
//! - Login response with a sparse user record
//! - Registration bodies match the backend field names
//! - Provisional registration flow payloads
//! - Error conversion surface for consumers

use conex_domain::{
    AuthResponse, CompanyRegistration, ConexError, EmailVerification, ProvisionalUser, User,
};
use serde_json::json;

#[test]
fn login_response_with_sparse_user() -> anyhow::Result<()> {
    let auth: AuthResponse = serde_json::from_value(json!({
        "access_token": "eyJhbGciOiJIUzI1NiJ9.a",
        "refresh_token": "eyJhbGciOiJIUzI1NiJ9.r",
        "user": {
            "id": "65f0c0ffee",
            "email": "tanaka@example.jp",
            "username": "tanaka"
        }
    }))?;

    assert_eq!(auth.token_type, "bearer");
    assert_eq!(auth.expires_in, 0);
    assert!(auth.user.is_active);
    assert!(auth.user.permissions.is_empty());
    assert_eq!(auth.user.display_name(), "tanaka");
    Ok(())
}

#[test]
fn admin_has_every_permission() -> anyhow::Result<()> {
    let user: User = serde_json::from_value(json!({
        "id": "u9",
        "email": "admin@example.jp",
        "username": "admin",
        "is_admin": true,
        "role": "admin",
        "last_login": "2024-05-10T01:02:03Z"
    }))?;

    assert!(user.has_permission("company_manage"));
    assert!(user.last_login.is_some());
    Ok(())
}

#[test]
fn company_registration_uses_backend_field_names() -> anyhow::Result<()> {
    let request = CompanyRegistration {
        email: "sato@example.jp".to_string(),
        username: "sato".to_string(),
        password: "pa55word".to_string(),
        company_name: "株式会社サンプル".to_string(),
        company_name_furigana: "カブシキガイシャサンプル".to_string(),
        person_in_charge: "佐藤 花子".to_string(),
        person_in_charge_furigana: "サトウ ハナコ".to_string(),
        phone_number: "03-1234-5678".to_string(),
    };

    let body = serde_json::to_value(&request)?;
    for key in [
        "email",
        "username",
        "password",
        "company_name",
        "company_name_furigana",
        "person_in_charge",
        "person_in_charge_furigana",
        "phone_number",
    ] {
        assert!(body.get(key).is_some(), "missing {key}");
    }
    Ok(())
}

#[test]
fn provisional_flow_payloads() -> anyhow::Result<()> {
    let provisional: ProvisionalUser = serde_json::from_value(json!({
        "id": "p1",
        "email": "sato@example.jp",
        "company_name": "株式会社サンプル",
        "is_verified": false,
        "expires_at": "2024-05-11T00:00:00Z"
    }))?;
    assert!(!provisional.is_verified);
    assert!(provisional.phone_number.is_empty());

    let verification: EmailVerification = serde_json::from_value(json!({
        "message": "Email verified",
        "provisional_user_id": "p1",
        "email": "sato@example.jp"
    }))?;
    assert_eq!(verification.provisional_user_id.as_deref(), Some("p1"));
    Ok(())
}

#[test]
fn only_auth_errors_end_the_session() {
    assert!(ConexError::Auth("expired".into()).is_session_fatal());
    assert!(!ConexError::Network("connection refused".into()).is_session_fatal());
    assert!(!ConexError::Backend("Not Found".into()).is_session_fatal());
}
