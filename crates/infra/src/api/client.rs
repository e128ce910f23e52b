//! Authenticated client for the OCR backend
//!
//! Single point of HTTP access: injects the bearer token, encodes request
//! bodies, decodes JSON responses and recovers from an expired access token
//! by refreshing once and retrying the original request once.

use std::sync::Arc;
use std::time::Duration;

use conex_common::auth::{MemorySessionStore, SessionStore, TokenPair};
use conex_domain::constants::{
    AUTH_COMPLETE_REGISTRATION, AUTH_LOGIN, AUTH_LOGOUT, AUTH_ME, AUTH_PROFILE,
    AUTH_PROVISIONAL_REGISTER, AUTH_REFRESH, AUTH_REGISTER, AUTH_REGISTER_WITH_COMPANY,
    AUTH_VERIFY_EMAIL, DATA, FILES,
};
use conex_domain::{
    ApiConfig, AuthResponse, CompanyRegistration, CompleteRegistration, CsvFormat,
    EmailVerification, ProfileUpdate, ProvisionalRegistration, ProvisionalUser, RegisterRequest,
    User, UserProfile,
};
use parking_lot::RwLock;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::billing::BillingApi;
use super::body::{filename_from_disposition, Blob, RequestBody};
use super::companies::CompaniesApi;
use super::conversion::ConversionApi;
use super::data::DataApi;
use super::errors::ApiError;
use super::files::FilesApi;
use super::{path_segment, with_query};
use crate::http::HttpClient;

/// Client for the backend REST API
///
/// Holds the session token pair in memory, mirrored to a [`SessionStore`].
/// Share it behind an `Arc`; all methods take `&self`.
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
    store: Arc<dyn SessionStore>,
    tokens: RwLock<Option<TokenPair>>,
    // Serialises refreshes so concurrent 401s rotate the pair only once.
    refresh_lock: tokio::sync::Mutex<()>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

/// Token response of `/auth/refresh`; only the pair is needed.
#[derive(Deserialize)]
struct RefreshResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

impl ApiClient {
    /// Create a client from configuration
    ///
    /// # Arguments
    /// * `config` - Backend origin, timeout and user agent
    /// * `store` - Where the session is persisted; read once here
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the base URL is invalid or the HTTP client
    /// cannot be built
    pub fn new(config: &ApiConfig, store: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        let mut builder = Self::builder().base_url(&config.base_url).session_store(store);
        builder = builder.timeout(config.timeout());
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent);
        }
        builder.build()
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether an access token is held. No network call is made; the token
    /// may have expired server-side.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.tokens.read().is_some()
    }

    pub fn files(&self) -> FilesApi<'_> {
        FilesApi::new(self)
    }

    pub fn conversion(&self) -> ConversionApi<'_> {
        ConversionApi::new(self)
    }

    pub fn data(&self) -> DataApi<'_> {
        DataApi::new(self)
    }

    pub fn companies(&self) -> CompaniesApi<'_> {
        CompaniesApi::new(self)
    }

    pub fn billing(&self) -> BillingApi<'_> {
        BillingApi::new(self)
    }

    // ------------------------------------------------------------------
    // Request pipeline
    // ------------------------------------------------------------------

    /// Send a request and decode the JSON response
    ///
    /// The login endpoint is always form-encoded; multipart bodies pass
    /// through; everything else is JSON. With `requires_auth`, the bearer
    /// token is attached when present, and a 401 triggers one refresh
    /// followed by exactly one retry.
    ///
    /// # Returns
    /// The decoded body; 204/205 and empty bodies decode from `null`
    ///
    /// # Errors
    /// - `ApiError::Http` for non-2xx responses, carrying the backend
    ///   `detail` or the status line
    /// - The refresh error if the token could not be renewed (the session is
    ///   cleared)
    /// - `ApiError::Network`/`Timeout`/`Decode` for transport and parsing
    ///   failures
    #[instrument(skip(self, body), fields(%method, endpoint = %endpoint))]
    pub async fn make_request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: RequestBody,
        requires_auth: bool,
    ) -> Result<T, ApiError> {
        let response = self.execute(&method, endpoint, &body, requires_auth).await?;
        decode_json(response).await
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.make_request(Method::GET, endpoint, RequestBody::Empty, true).await
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: RequestBody,
    ) -> Result<T, ApiError> {
        self.make_request(Method::POST, endpoint, body, true).await
    }

    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: RequestBody,
    ) -> Result<T, ApiError> {
        self.make_request(Method::PUT, endpoint, body, true).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.make_request(Method::DELETE, endpoint, RequestBody::Empty, true).await
    }

    async fn execute(
        &self,
        method: &Method,
        endpoint: &str,
        body: &RequestBody,
        requires_auth: bool,
    ) -> Result<Response, ApiError> {
        let token = if requires_auth { self.access_token() } else { None };
        let response = self.send(method, endpoint, body, token.as_deref()).await?;

        if !requires_auth || response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        debug!("Access token rejected; refreshing before a single retry");
        self.refresh_after_rejection(token.as_deref()).await?;

        let token = self.access_token();
        self.send(method, endpoint, body, token.as_deref()).await
    }

    async fn send(
        &self,
        method: &Method,
        endpoint: &str,
        body: &RequestBody,
        token: Option<&str>,
    ) -> Result<Response, ApiError> {
        let mut builder = self.http.request(method.clone(), self.url(endpoint));
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        let builder = body.apply(builder, is_login(endpoint))?;
        self.http.send(builder).await
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    // ------------------------------------------------------------------
    // Token lifecycle
    // ------------------------------------------------------------------

    fn access_token(&self) -> Option<String> {
        self.tokens.read().as_ref().map(|t| t.access_token.clone())
    }

    fn refresh_token(&self) -> Option<String> {
        self.tokens.read().as_ref().and_then(|t| t.refresh_token.clone()).filter(|t| !t.is_empty())
    }

    /// Exchange the refresh token for a new pair
    ///
    /// # Errors
    /// Returns `ApiError::NotAuthenticated` without a refresh token, or the
    /// backend error; in both cases the stored session is cleared.
    #[instrument(skip(self))]
    pub async fn refresh_access_token(&self) -> Result<(), ApiError> {
        let _guard = self.refresh_lock.lock().await;
        self.refresh_locked().await
    }

    /// Refresh unless another caller already replaced the rejected token
    /// while this one waited for the lock.
    async fn refresh_after_rejection(&self, rejected: Option<&str>) -> Result<(), ApiError> {
        let _guard = self.refresh_lock.lock().await;

        let current = self.access_token();
        if current.is_some() && current.as_deref() != rejected {
            debug!("Access token already rotated by a concurrent refresh");
            return Ok(());
        }

        self.refresh_locked().await
    }

    async fn refresh_locked(&self) -> Result<(), ApiError> {
        let Some(refresh_token) = self.refresh_token() else {
            warn!("No refresh token available; clearing session");
            self.clear_session();
            return Err(ApiError::NotAuthenticated);
        };

        let body = RequestBody::Json(serde_json::json!({ "refresh_token": refresh_token }));
        let result = match self.send(&Method::POST, AUTH_REFRESH, &body, None).await {
            Ok(response) => decode_json::<RefreshResponse>(response).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(refreshed) => {
                let tokens = TokenPair {
                    access_token: refreshed.access_token,
                    refresh_token: refreshed.refresh_token.or(Some(refresh_token)),
                };
                *self.tokens.write() = Some(tokens.clone());
                if let Err(err) = self.store.save(&tokens) {
                    warn!(error = %err, "Failed to persist refreshed tokens");
                }
                info!("Access token refreshed");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Token refresh failed; clearing session");
                self.clear_session();
                Err(err)
            }
        }
    }

    /// Adopt a freshly issued pair and persist it.
    ///
    /// A store failure only costs the session its survival across restarts,
    /// so it is logged and the process stays logged in.
    fn establish_session(&self, auth: &AuthResponse) {
        let tokens = TokenPair::new(auth.access_token.clone(), auth.refresh_token.clone());
        *self.tokens.write() = Some(tokens.clone());
        if let Err(err) = self.store.save(&tokens) {
            warn!(error = %err, "Failed to persist session tokens");
        }
    }

    fn clear_session(&self) {
        *self.tokens.write() = None;
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "Failed to clear persisted session");
        }
    }

    // ------------------------------------------------------------------
    // Auth endpoints
    // ------------------------------------------------------------------

    /// Log in with e-mail (or username) and password
    ///
    /// # Errors
    /// Returns `ApiError::Http` with the backend message on bad credentials
    #[instrument(skip_all)]
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = RequestBody::form([("username", username), ("password", password)]);
        let auth: AuthResponse = self.make_request(Method::POST, AUTH_LOGIN, body, false).await?;
        self.establish_session(&auth);
        info!(user_id = %auth.user.id, "Logged in");
        Ok(auth)
    }

    /// Create an account, then log in with it
    ///
    /// # Errors
    /// Returns the registration error, or the error of the chained login
    #[instrument(skip_all)]
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        let user: User = self
            .make_request(Method::POST, AUTH_REGISTER, RequestBody::json(request)?, false)
            .await?;
        info!(user_id = %user.id, "Account registered");
        self.login(&user.email, &request.password).await
    }

    /// Create an account together with its company, then log in
    ///
    /// # Errors
    /// Returns the registration error, or the error of the chained login
    #[instrument(skip_all)]
    pub async fn register_with_company(
        &self,
        request: &CompanyRegistration,
    ) -> Result<AuthResponse, ApiError> {
        let user: User = self
            .make_request(
                Method::POST,
                AUTH_REGISTER_WITH_COMPANY,
                RequestBody::json(request)?,
                false,
            )
            .await?;
        info!(user_id = %user.id, "Company account registered");
        self.login(&user.email, &request.password).await
    }

    /// Start the e-mail verified registration flow
    ///
    /// # Errors
    /// Returns `ApiError::Http` if the e-mail is already registered
    #[instrument(skip_all)]
    pub async fn provisional_register(
        &self,
        request: &ProvisionalRegistration,
    ) -> Result<ProvisionalUser, ApiError> {
        self.make_request(Method::POST, AUTH_PROVISIONAL_REGISTER, RequestBody::json(request)?, false)
            .await
    }

    /// Confirm the e-mail address of a provisional account
    ///
    /// # Errors
    /// Returns `ApiError::Http` for unknown or expired tokens
    #[instrument(skip_all)]
    pub async fn verify_email(&self, verification_token: &str) -> Result<EmailVerification, ApiError> {
        let body = RequestBody::Json(serde_json::json!({ "verification_token": verification_token }));
        self.make_request(Method::POST, AUTH_VERIFY_EMAIL, body, false).await
    }

    /// Choose credentials for a verified provisional account, then log in
    ///
    /// # Errors
    /// Returns the registration error, or the error of the chained login
    #[instrument(skip_all)]
    pub async fn complete_registration(
        &self,
        request: &CompleteRegistration,
    ) -> Result<AuthResponse, ApiError> {
        let user: User = self
            .make_request(
                Method::POST,
                AUTH_COMPLETE_REGISTRATION,
                RequestBody::json(request)?,
                false,
            )
            .await?;
        info!(user_id = %user.id, "Registration completed");
        self.login(&user.email, &request.password).await
    }

    /// Fetch the account behind the current session (`/auth/me`)
    ///
    /// # Errors
    /// Returns `ApiError::Http` (401) or the refresh error when the session is
    /// no longer valid
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.get(AUTH_ME).await
    }

    /// Profile with OCR usage statistics
    ///
    /// # Errors
    /// See [`ApiClient::make_request`]
    pub async fn profile(&self) -> Result<UserProfile, ApiError> {
        self.get(AUTH_PROFILE).await
    }

    /// Save profile edits
    ///
    /// # Errors
    /// See [`ApiClient::make_request`]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        self.put(AUTH_PROFILE, RequestBody::json(update)?).await
    }

    /// End the session
    ///
    /// The backend call is best effort; local tokens are cleared whatever
    /// its outcome.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        if let Some(token) = self.access_token() {
            match self.send(&Method::POST, AUTH_LOGOUT, &RequestBody::Empty, Some(&token)).await {
                Ok(response) if response.status().is_success() => {
                    debug!("Backend session ended");
                }
                Ok(response) => {
                    debug!(status = %response.status(), "Backend logout rejected; ignoring");
                }
                Err(err) => debug!(error = %err, "Backend logout failed; ignoring"),
            }
        }

        self.clear_session();
        info!("Logged out");
    }

    // ------------------------------------------------------------------
    // Raw downloads
    // ------------------------------------------------------------------

    /// File content for inline preview (`/files/serve/{id}`)
    ///
    /// # Errors
    /// See [`ApiClient::fetch_blob`]
    pub async fn serve_file(&self, file_id: &str) -> Result<Blob, ApiError> {
        self.fetch_blob(&format!("{FILES}/serve/{}", path_segment(file_id))).await
    }

    /// File content through the viewer endpoint (`/files/view/{id}`)
    ///
    /// # Errors
    /// See [`ApiClient::fetch_blob`]
    pub async fn view_file(&self, file_id: &str) -> Result<Blob, ApiError> {
        self.fetch_blob(&format!("{FILES}/view/{}", path_segment(file_id))).await
    }

    /// File content as an attachment (`/files/download/{id}`)
    ///
    /// # Errors
    /// See [`ApiClient::fetch_blob`]
    pub async fn download_file(&self, file_id: &str) -> Result<Blob, ApiError> {
        self.fetch_blob(&format!("{FILES}/download/{}", path_segment(file_id))).await
    }

    /// All extracted records of the user as CSV in the given layout
    ///
    /// # Errors
    /// See [`ApiClient::fetch_blob`]
    pub async fn export_data_to_csv(&self, format: CsvFormat) -> Result<Blob, ApiError> {
        let endpoint = with_query(&format!("{DATA}/export/csv"), &[("format", format.as_str())]);
        self.fetch_blob(&endpoint).await
    }

    /// Authenticated GET returning the raw body
    ///
    /// Bypasses JSON decoding and the refresh-and-retry path.
    ///
    /// # Errors
    /// Returns `ApiError::Http` whose message is the backend `detail`, else
    /// the status line followed by the response text
    #[instrument(skip(self), fields(endpoint = %endpoint))]
    pub async fn fetch_blob(&self, endpoint: &str) -> Result<Blob, ApiError> {
        let token = self.access_token();
        let response =
            self.send(&Method::GET, endpoint, &RequestBody::Empty, token.as_deref()).await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = detail_message(&text).unwrap_or_else(|| {
                let line = status_line(status);
                if text.trim().is_empty() {
                    line
                } else {
                    format!("{line}: {}", text.trim())
                }
            });
            return Err(ApiError::http(status, message));
        }

        let content_type = header_str(&response, CONTENT_TYPE.as_str());
        let filename = header_str(&response, CONTENT_DISPOSITION.as_str())
            .as_deref()
            .and_then(filename_from_disposition);
        let bytes = response.bytes().await?.to_vec();
        debug!(len = bytes.len(), "Blob downloaded");

        Ok(Blob { bytes, content_type, filename })
    }
}

/// Builder for [`ApiClient`]
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    store: Option<Arc<dyn SessionStore>>,
}

impl ApiClientBuilder {
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Defaults to a fresh [`MemorySessionStore`]
    #[must_use]
    pub fn session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// # Errors
    /// Returns `ApiError::Config` if the base URL is missing or invalid
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ApiError::Config("API base URL is required".to_string()))?;
        let parsed = url::Url::parse(&base_url)
            .map_err(|e| ApiError::Config(format!("Invalid API base URL {base_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!("Unsupported URL scheme: {}", parsed.scheme())));
        }

        let mut http = HttpClient::builder().timeout(self.timeout);
        if let Some(agent) = self.user_agent {
            http = http.user_agent(agent);
        }
        let http = http.build()?;

        let store: Arc<dyn SessionStore> =
            self.store.unwrap_or_else(|| Arc::new(MemorySessionStore::new()));
        let tokens = match store.load() {
            Ok(tokens) => tokens,
            Err(err) => {
                warn!(error = %err, "Failed to load persisted session; starting anonymous");
                None
            }
        };
        debug!(restored = tokens.is_some(), "API client created");

        Ok(ApiClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
            tokens: RwLock::new(tokens),
            refresh_lock: tokio::sync::Mutex::new(()),
        })
    }
}

fn is_login(endpoint: &str) -> bool {
    endpoint.split('?').next() == Some(AUTH_LOGIN)
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = detail_message(&text).unwrap_or_else(|| status_line(status));
        return Err(ApiError::http(status, message));
    }

    let bytes = if matches!(status, StatusCode::NO_CONTENT | StatusCode::RESET_CONTENT) {
        Vec::new()
    } else {
        response.bytes().await?.to_vec()
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
            ApiError::Decode(format!(
                "empty response ({}) cannot be decoded into the expected type",
                status.as_u16()
            ))
        });
    }

    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

/// `HTTP 404 Not Found`
fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("HTTP {} {reason}", status.as_u16()),
        None => format!("HTTP {}", status.as_u16()),
    }
}

/// Backend `detail` of an error body
///
/// A string is used as is; a validation error list becomes its `msg`
/// entries joined with "; ".
fn detail_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(serde_json::Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        serde_json::Value::Null | serde_json::Value::String(_) => None,
        other => Some(other.to_string()),
    }
}

fn header_str(response: &Response, name: &str) -> Option<String> {
    response.headers().get(name).and_then(|v| v.to_str().ok()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn user_json() -> serde_json::Value {
        serde_json::json!({
            "id": "u1",
            "email": "tanaka@example.jp",
            "username": "tanaka",
            "is_active": true,
            "is_admin": false,
            "role": "member",
            "permissions": []
        })
    }

    fn token_json(access: &str, refresh: &str) -> serde_json::Value {
        serde_json::json!({
            "access_token": access,
            "refresh_token": refresh,
            "token_type": "bearer",
            "expires_in": 1800,
            "user": user_json()
        })
    }

    fn client_for(server: &MockServer, store: MemorySessionStore) -> ApiClient {
        ApiClient::builder()
            .base_url(server.uri())
            .session_store(Arc::new(store))
            .build()
            .expect("api client")
    }

    #[test]
    fn detail_message_variants() {
        assert_eq!(detail_message(r#"{"detail":"Incorrect email or password"}"#).as_deref(), Some("Incorrect email or password"));
        assert_eq!(
            detail_message(
                r#"{"detail":[{"loc":["body","email"],"msg":"value is not a valid email address"},{"msg":"field required"}]}"#
            )
            .as_deref(),
            Some("value is not a valid email address; field required")
        );
        assert_eq!(detail_message("<html>Bad gateway</html>"), None);
        assert_eq!(detail_message(r#"{"error":"x"}"#), None);
        assert_eq!(status_line(StatusCode::NOT_FOUND), "HTTP 404 Not Found");
    }

    #[test]
    fn builder_rejects_bad_urls() {
        assert!(matches!(ApiClient::builder().build(), Err(ApiError::Config(_))));
        assert!(matches!(
            ApiClient::builder().base_url("ftp://example.com").build(),
            Err(ApiError::Config(_))
        ));
        let client = ApiClient::builder().base_url("http://127.0.0.1:8000/").build().unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8000");
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn login_is_form_encoded_and_persists_tokens() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(AUTH_LOGIN))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("username=tanaka%40example.jp"))
            .and(body_string_contains("password=secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_json("a1", "r1")))
            .expect(1)
            .mount(&server)
            .await;

        let store = MemorySessionStore::new();
        let client = client_for(&server, store.clone());

        let auth = client.login("tanaka@example.jp", "secret").await.unwrap();

        assert_eq!(auth.user.username, "tanaka");
        assert!(client.is_authenticated());
        assert_eq!(store.snapshot(), Some(TokenPair::new("a1", "r1")));
    }

    #[tokio::test]
    async fn login_failure_surfaces_backend_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(AUTH_LOGIN))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"detail": "Incorrect email or password"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, MemorySessionStore::new());
        let err = client.login("tanaka@example.jp", "wrong").await.unwrap_err();

        // Unauthenticated calls never enter the refresh path.
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.to_string(), "Incorrect email or password");
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn authenticated_json_request_carries_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path(AUTH_PROFILE))
            .and(header("authorization", "Bearer a1"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({"first_name": "Taro"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, MemorySessionStore::with_tokens(TokenPair::new("a1", "r1")));
        let update = ProfileUpdate { first_name: Some("Taro".into()), ..Default::default() };
        let profile = client.update_profile(&update).await.unwrap();

        assert_eq!(profile.id, "u1");
    }

    #[tokio::test]
    async fn no_content_decodes_as_unit() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/files/f1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = client_for(&server, MemorySessionStore::with_tokens(TokenPair::new("a1", "r1")));
        let result: Result<(), ApiError> = client.delete("/api/v1/files/f1").await;
        assert!(result.is_ok());

        let value: Option<User> = client.delete("/api/v1/files/f1").await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn non_json_error_uses_status_line() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(AUTH_ME))
            .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let client = client_for(&server, MemorySessionStore::with_tokens(TokenPair::new("a1", "r1")));
        let err = client.current_user().await.unwrap_err();

        assert_eq!(err.to_string(), "HTTP 502 Bad Gateway");
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn blob_error_includes_response_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/files/download/f9"))
            .respond_with(ResponseTemplate::new(500).set_body_string("disk unavailable"))
            .mount(&server)
            .await;

        let client = client_for(&server, MemorySessionStore::with_tokens(TokenPair::new("a1", "r1")));
        let err = client.download_file("f9").await.unwrap_err();

        assert_eq!(err.to_string(), "HTTP 500 Internal Server Error: disk unavailable");
    }
}
