//! Session state machine
//!
//! [`AuthManager`] layers an observable [`AuthState`] over the API client's
//! account operations. Transitions and their notifications are serialised,
//! so listeners observe states in the order they were applied and the last
//! state delivered is always the current one.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use conex_common::time::{SharedClock, SystemClock};
use conex_domain::constants::DEFAULT_VALIDATION_TTL_SECS;
use conex_domain::{
    AuthResponse, CompanyRegistration, CompleteRegistration, ProfileUpdate, RegisterRequest,
    SessionConfig, User, UserProfile,
};
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

use super::backend::AuthBackend;
use super::state::AuthState;
use super::subscribers::{Subscribers, Subscription};
use crate::api::ApiError;

/// Observable session store
///
/// Construct one per process and share it behind an `Arc`.
pub struct AuthManager {
    backend: Arc<dyn AuthBackend>,
    clock: SharedClock,
    validation_ttl: Duration,
    state: RwLock<AuthState>,
    // Held from a state write until its listeners have run.
    notify_lock: Mutex<()>,
    subscribers: Subscribers,
}

impl std::fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthManager")
            .field("state", &*self.state.read())
            .field("validation_ttl", &self.validation_ttl)
            .finish_non_exhaustive()
    }
}

impl AuthManager {
    /// Anonymous manager over `backend`, using the system clock and the
    /// default five minute validation TTL
    pub fn new(backend: Arc<dyn AuthBackend>) -> Self {
        Self {
            backend,
            clock: Arc::new(SystemClock),
            validation_ttl: Duration::from_secs(DEFAULT_VALIDATION_TTL_SECS),
            state: RwLock::new(AuthState::Anonymous),
            notify_lock: Mutex::new(()),
            subscribers: Subscribers::default(),
        }
    }

    /// Manager configured from session settings
    pub fn from_config(backend: Arc<dyn AuthBackend>, config: &SessionConfig) -> Self {
        Self::new(backend).with_validation_ttl(config.validation_ttl())
    }

    #[must_use]
    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub const fn with_validation_ttl(mut self, ttl: Duration) -> Self {
        self.validation_ttl = ttl;
        self
    }

    /// Snapshot of the current state
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state.read().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.read().is_authenticated()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.read().is_loading()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.state.read().user().cloned()
    }

    /// Register a listener called with the new state on every transition
    ///
    /// Listeners run synchronously on the task that caused the transition,
    /// one transition at a time; keep them short. A listener may read the
    /// state but must not wait on another transition of this manager. The
    /// returned handle unsubscribes on drop.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&AuthState) + Send + Sync + 'static,
    {
        self.subscribers.add(Arc::new(listener))
    }

    /// Whether the session is due for a round-trip to the backend
    #[must_use]
    pub fn should_validate_token(&self) -> bool {
        match self.state.read().last_validation_time() {
            Some(validated_at) => self.clock.since(validated_at) > self.validation_ttl,
            None => true,
        }
    }

    /// Bring the state in line with the stored session at start-up
    ///
    /// Without a token the state becomes anonymous. A token validated within
    /// the TTL is trusted as is; otherwise `/auth/me` decides, and a rejected
    /// session is logged out.
    #[instrument(skip(self))]
    pub async fn initialize(&self) {
        if !self.backend.has_session() {
            debug!("No stored session");
            self.replace(AuthState::Anonymous);
            return;
        }

        if !self.should_validate_token() {
            debug!("Session validated recently; skipping revalidation");
            return;
        }

        self.validate_token().await;
    }

    /// Re-check the session against the backend
    ///
    /// Never fails: a rejected session is logged out and `false` returned.
    #[instrument(skip(self))]
    pub async fn validate_token(&self) -> bool {
        self.update(AuthState::loading);

        match self.backend.current_user().await {
            Ok(user) => {
                debug!(user_id = %user.id, "Session validated");
                self.authenticated(user);
                true
            }
            Err(err) => {
                warn!(error = %err, "Session validation failed; logging out");
                self.logout().await;
                false
            }
        }
    }

    /// # Errors
    /// Returns the backend error; the previous session, if any, is kept
    #[instrument(skip_all)]
    pub async fn login(&self, username: &str, password: &str) -> Result<User, ApiError> {
        self.authenticate(self.backend.login(username, password)).await
    }

    /// # Errors
    /// Returns the registration or chained login error
    #[instrument(skip_all)]
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        self.authenticate(self.backend.register(request)).await
    }

    /// # Errors
    /// Returns the registration or chained login error
    #[instrument(skip_all)]
    pub async fn register_with_company(
        &self,
        request: &CompanyRegistration,
    ) -> Result<User, ApiError> {
        self.authenticate(self.backend.register_with_company(request)).await
    }

    /// # Errors
    /// Returns the registration or chained login error
    #[instrument(skip_all)]
    pub async fn complete_registration(
        &self,
        request: &CompleteRegistration,
    ) -> Result<User, ApiError> {
        self.authenticate(self.backend.complete_registration(request)).await
    }

    async fn authenticate<F>(&self, call: F) -> Result<User, ApiError>
    where
        F: Future<Output = Result<AuthResponse, ApiError>> + Send,
    {
        self.update(AuthState::loading);

        match call.await {
            Ok(auth) => {
                info!(user_id = %auth.user.id, "Session established");
                self.authenticated(auth.user.clone());
                Ok(auth.user)
            }
            Err(err) => {
                debug!(error = %err, "Authentication failed");
                self.update(AuthState::settled);
                Err(err)
            }
        }
    }

    /// End the session. The backend is told on a best-effort basis; the
    /// state always ends anonymous.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        self.update(AuthState::loading);
        self.backend.logout().await;
        self.replace(AuthState::Anonymous);
        info!("Session ended");
    }

    /// Re-fetch the user; a failure forces a logout
    ///
    /// # Errors
    /// Returns the fetch error after logging out
    #[instrument(skip(self))]
    pub async fn refresh_user_data(&self) -> Result<User, ApiError> {
        match self.backend.current_user().await {
            Ok(user) => {
                self.authenticated(user.clone());
                Ok(user)
            }
            Err(err) => {
                warn!(error = %err, "Failed to refresh user data; logging out");
                self.logout().await;
                Err(err)
            }
        }
    }

    /// Save profile edits and patch the cached user with the result
    ///
    /// # Errors
    /// Returns the backend error; the state is left untouched
    #[instrument(skip_all)]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        let profile = self.backend.update_profile(update).await?;

        self.update(|state| match state {
            AuthState::Authenticated { user, validated_at } => {
                let mut user = user.clone();
                user.apply_profile(&profile);
                AuthState::Authenticated { user, validated_at: *validated_at }
            }
            AuthState::Revalidating { user, validated_at } => {
                let mut user = user.clone();
                user.apply_profile(&profile);
                AuthState::Revalidating { user, validated_at: *validated_at }
            }
            other => other.clone(),
        });

        Ok(profile)
    }

    pub(crate) fn backend_has_session(&self) -> bool {
        self.backend.has_session()
    }

    fn authenticated(&self, user: User) {
        let validated_at = self.clock.now();
        self.replace(AuthState::Authenticated { user, validated_at });
    }

    fn replace(&self, next: AuthState) {
        self.update(|_| next);
    }

    /// Apply a transition and notify listeners if the state changed.
    ///
    /// The notify guard is taken before the state lock and held through
    /// delivery, so a concurrent transition cannot be delivered ahead of
    /// this one.
    fn update<F>(&self, transition: F)
    where
        F: FnOnce(&AuthState) -> AuthState,
    {
        let _delivery = self.notify_lock.lock();
        let changed = {
            let mut state = self.state.write();
            let next = transition(&state);
            if *state == next {
                None
            } else {
                *state = next.clone();
                Some(next)
            }
        };

        if let Some(state) = changed {
            self.subscribers.notify(&state);
        }
    }
}
