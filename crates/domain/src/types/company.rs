//! Company and membership types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub company_name: String,
    #[serde(default)]
    pub company_name_furigana: String,
    #[serde(default)]
    pub representative_user_id: String,
    /// Member user ids
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyMember {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Invitation of a new member by the company representative
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInvite {
    pub email: String,
    pub username: String,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "member".to_string()
}

impl MemberInvite {
    #[must_use]
    pub fn new(email: impl Into<String>, username: impl Into<String>) -> Self {
        Self { email: email.into(), username: username.into(), role: default_role() }
    }

    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }
}

/// Account created for an invited member
///
/// The backend does not mail the temporary password yet; the inviter is
/// expected to hand it over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvitedMember {
    #[serde(default)]
    pub message: String,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub temporary_password: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invite_defaults_to_member_role() {
        let invite: MemberInvite =
            serde_json::from_str(r#"{"email":"sato@example.jp","username":"sato"}"#).unwrap();
        assert_eq!(invite, MemberInvite::new("sato@example.jp", "sato"));
        assert_eq!(invite.with_role("admin").role, "admin");
    }

    #[test]
    fn company_parses_backend_shape() {
        let company: Company = serde_json::from_value(serde_json::json!({
            "id": "c1",
            "company_name": "株式会社サンプル",
            "company_name_furigana": "カブシキガイシャサンプル",
            "representative_user_id": "u1",
            "members": ["u1", "u2"],
            "is_active": true,
            "created_at": "2024-04-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(company.members.len(), 2);
        assert!(company.updated_at.is_none());
    }
}
