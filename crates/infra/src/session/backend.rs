//! Backend seam of the session manager

use async_trait::async_trait;
use conex_domain::{
    AuthResponse, CompanyRegistration, CompleteRegistration, ProfileUpdate, RegisterRequest, User,
    UserProfile,
};

use crate::api::{ApiClient, ApiError};

/// Account operations the session manager drives
///
/// Implemented by [`ApiClient`]; tests substitute scripted backends.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Whether an access token is held
    fn has_session(&self) -> bool;

    async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, ApiError>;

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError>;

    async fn register_with_company(
        &self,
        request: &CompanyRegistration,
    ) -> Result<AuthResponse, ApiError>;

    async fn complete_registration(
        &self,
        request: &CompleteRegistration,
    ) -> Result<AuthResponse, ApiError>;

    async fn current_user(&self) -> Result<User, ApiError>;

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ApiError>;

    /// End the session; never fails
    async fn logout(&self);
}

#[async_trait]
impl AuthBackend for ApiClient {
    fn has_session(&self) -> bool {
        self.is_authenticated()
    }

    async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, ApiError> {
        Self::login(self, username, password).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        Self::register(self, request).await
    }

    async fn register_with_company(
        &self,
        request: &CompanyRegistration,
    ) -> Result<AuthResponse, ApiError> {
        Self::register_with_company(self, request).await
    }

    async fn complete_registration(
        &self,
        request: &CompleteRegistration,
    ) -> Result<AuthResponse, ApiError> {
        Self::complete_registration(self, request).await
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        Self::current_user(self).await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        Self::update_profile(self, update).await
    }

    async fn logout(&self) {
        Self::logout(self).await;
    }
}
