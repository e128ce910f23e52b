//! User, profile and registration types
//!
//! `User` is treated as an opaque value object: the client replaces it
//! wholesale on every fetch and only patches it locally after a successful
//! profile edit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account record returned by `/auth/me`, login and registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

const fn default_true() -> bool {
    true
}

impl User {
    #[must_use]
    pub fn has_permission(&self, permission: &str) -> bool {
        self.is_admin || self.permissions.iter().any(|p| p == permission)
    }

    /// Display name: "first last" when available, otherwise the username
    #[must_use]
    pub fn display_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) if !first.is_empty() || !last.is_empty() => {
                format!("{first} {last}").trim().to_string()
            }
            (Some(first), None) if !first.is_empty() => first.to_string(),
            _ => self.username.clone(),
        }
    }

    /// Apply the editable fields of a freshly saved profile.
    pub fn apply_profile(&mut self, profile: &UserProfile) {
        self.username.clone_from(&profile.username);
        self.first_name.clone_from(&profile.first_name);
        self.last_name.clone_from(&profile.last_name);
        self.profile_image.clone_from(&profile.profile_image);
    }
}

/// Profile view with OCR usage statistics (`/auth/profile`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ocr_usage_this_month: u64,
    #[serde(default)]
    pub ocr_usage_last_month: u64,
    #[serde(default)]
    pub last_ocr_usage: Option<DateTime<Utc>>,
}

/// Sparse profile edit; unset fields are left untouched by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

/// Token response from login and refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: i64,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Plain account registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// Registration that creates (or joins) a company in one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRegistration {
    pub email: String,
    pub username: String,
    pub password: String,
    pub company_name: String,
    pub company_name_furigana: String,
    pub person_in_charge: String,
    pub person_in_charge_furigana: String,
    pub phone_number: String,
}

/// First step of the e-mail verified registration flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionalRegistration {
    pub email: String,
    pub company_name: String,
    pub company_name_furigana: String,
    pub person_in_charge: String,
    pub person_in_charge_furigana: String,
    pub phone_number: String,
}

/// Provisional account awaiting e-mail verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionalUser {
    pub id: String,
    pub email: String,
    pub company_name: String,
    #[serde(default)]
    pub company_name_furigana: String,
    #[serde(default)]
    pub person_in_charge: String,
    #[serde(default)]
    pub person_in_charge_furigana: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Response of `/auth/verify-email`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailVerification {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub provisional_user_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Final step: choose credentials for a verified provisional account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteRegistration {
    pub verification_token: String,
    pub username: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        serde_json::from_value(serde_json::json!({
            "id": "65f0c0ffee",
            "email": "tanaka@example.jp",
            "username": "tanaka",
            "is_active": true,
            "is_admin": false,
            "role": "member",
            "permissions": ["ocr_convert"],
            "created_at": "2024-03-01T09:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn user_tolerates_missing_optional_fields() {
        let user = sample_user();
        assert_eq!(user.first_name, None);
        assert!(user.has_permission("ocr_convert"));
        assert!(!user.has_permission("company_manage"));
        assert_eq!(user.display_name(), "tanaka");
    }

    #[test]
    fn apply_profile_patches_only_editable_fields() {
        let mut user = sample_user();
        let profile = UserProfile {
            id: user.id.clone(),
            email: "other@example.jp".to_string(),
            username: "tanaka-t".to_string(),
            first_name: Some("Taro".to_string()),
            last_name: Some("Tanaka".to_string()),
            profile_image: None,
            is_admin: true,
            last_login: None,
            company_id: None,
            role: "admin".to_string(),
            permissions: vec![],
            created_at: None,
            ocr_usage_this_month: 12,
            ocr_usage_last_month: 3,
            last_ocr_usage: None,
        };

        user.apply_profile(&profile);

        assert_eq!(user.username, "tanaka-t");
        assert_eq!(user.display_name(), "Taro Tanaka");
        // Not editable through the profile form
        assert_eq!(user.email, "tanaka@example.jp");
        assert!(!user.is_admin);
    }

    #[test]
    fn profile_update_omits_unset_fields() {
        let update = ProfileUpdate { first_name: Some("Hanako".to_string()), ..Default::default() };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"first_name": "Hanako"}));
    }
}
