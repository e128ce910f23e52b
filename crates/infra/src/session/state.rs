//! Session state

use chrono::{DateTime, Utc};
use conex_domain::User;

/// Where the session stands
///
/// The loading flag of the two in-flight variants is what a UI shows as a
/// spinner; `Revalidating` keeps the user visible while `/auth/me` is
/// re-checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    /// No session
    #[default]
    Anonymous,
    /// Login, registration or first validation in flight
    Authenticating,
    /// Session confirmed by the backend at `validated_at`
    Authenticated { user: User, validated_at: DateTime<Utc> },
    /// Authenticated, with a revalidation or logout in flight
    Revalidating { user: User, validated_at: DateTime<Utc> },
}

impl AuthState {
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. } | Self::Revalidating { .. })
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Authenticating | Self::Revalidating { .. })
    }

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated { user, .. } | Self::Revalidating { user, .. } => Some(user),
            Self::Anonymous | Self::Authenticating => None,
        }
    }

    #[must_use]
    pub const fn last_validation_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Authenticated { validated_at, .. } | Self::Revalidating { validated_at, .. } => {
                Some(*validated_at)
            }
            Self::Anonymous | Self::Authenticating => None,
        }
    }

    /// Same session with the loading flag raised
    #[must_use]
    pub(crate) fn loading(&self) -> Self {
        match self {
            Self::Anonymous | Self::Authenticating => Self::Authenticating,
            Self::Authenticated { user, validated_at }
            | Self::Revalidating { user, validated_at } => {
                Self::Revalidating { user: user.clone(), validated_at: *validated_at }
            }
        }
    }

    /// Same session with the loading flag cleared
    #[must_use]
    pub(crate) fn settled(&self) -> Self {
        match self {
            Self::Anonymous | Self::Authenticating => Self::Anonymous,
            Self::Authenticated { user, validated_at }
            | Self::Revalidating { user, validated_at } => {
                Self::Authenticated { user: user.clone(), validated_at: *validated_at }
            }
        }
    }
}
