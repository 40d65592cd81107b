//! Main OnboardClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::RequestBuilder;
use serde_json::Value;
use url::Url;

use crate::api::login::LOGIN_FAILED;
use crate::api::signup::SIGNUP_FAILED;
use crate::api::users::{USERS_FAILED, users_from_items};
use crate::api::{LoginRequest, SignupRequest, User};
use crate::config::{ApiConfig, Endpoints};
use crate::error::ApiError;
use crate::response::{ErrorBody, list_items};

/// Client for the onboarding API.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely.
///
/// # Example
///
/// ```ignore
/// use onboard_lib::{OnboardClient, api::LoginRequest};
///
/// let client = OnboardClient::builder()
///     .url("http://localhost:9999")
///     .build()?;
///
/// client.login(&LoginRequest::new("me@example.com", "secret")).await?;
/// ```
#[derive(Clone)]
pub struct OnboardClient {
    inner: Arc<OnboardClientInner>,
}

struct OnboardClientInner {
    base_url: String,
    endpoints: Endpoints,
    http_client: Client,
    timeout: Option<Duration>,
}

impl OnboardClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> OnboardClientBuilder<Missing> {
        OnboardClientBuilder::new()
    }

    /// Creates a client from an [`ApiConfig`].
    pub fn from_config(config: ApiConfig) -> Result<Self, ApiError> {
        let mut builder = Self::builder()
            .url(config.base_url)
            .endpoints(config.endpoints);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        builder.build()
    }

    /// Signs in. Any 2xx status is a success; the reply body is returned
    /// as-is (`Null` when empty).
    pub async fn login(&self, request: &LoginRequest) -> Result<Value, ApiError> {
        let url = self.url(&self.inner.endpoints.login);
        log::info!("Logging in as {}", request.username_or_email);
        let builder = self.inner.http_client.post(&url).json(request);
        self.send(builder, LOGIN_FAILED).await
    }

    /// Creates an account.
    pub async fn signup(&self, request: &SignupRequest) -> Result<Value, ApiError> {
        let url = self.url(&self.inner.endpoints.signup);
        log::info!("Creating account {}", request.username);
        let builder = self.inner.http_client.post(&url).json(request);
        self.send(builder, SIGNUP_FAILED).await
    }

    /// Fetches the user list shown on the home screen.
    pub async fn users(&self) -> Result<Vec<User>, ApiError> {
        let url = self.url(&self.inner.endpoints.users);
        let builder = self.inner.http_client.get(&url);
        let payload = self.send(builder, USERS_FAILED).await?;
        let users = users_from_items(list_items(payload));
        log::debug!("Fetched {} user(s)", users.len());
        Ok(users)
    }

    /// Returns the base URL of the API.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.inner.base_url.trim_end_matches('/'), endpoint)
    }

    async fn send(&self, mut request: RequestBuilder, default_message: &str) -> Result<Value, ApiError> {
        let timeout = self.inner.timeout;
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(e, timeout))?;

        let status = response.status();
        log::debug!("{} {}", status.as_u16(), response.url());

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::from_reqwest(e, timeout))?;

        if status.is_success() {
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            match serde_json::from_str(&text) {
                Ok(value) => Ok(value),
                Err(e) => Err(ApiError::parse_with_body(e.to_string(), text)),
            }
        } else {
            let Some(body) = ErrorBody::from_text(&text) else {
                log::warn!("Request rejected with {} and a non-JSON body", status.as_u16());
                return Err(ApiError::unreadable_rejection(
                    status.as_u16(),
                    "error response is not JSON",
                    text,
                ));
            };
            let message = body.message_or(default_message);
            log::warn!("Request rejected with {}: {}", status.as_u16(), message);
            Err(ApiError::http_with_body(status.as_u16(), message, body))
        }
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing an [`OnboardClient`].
///
/// Uses the typestate pattern so `build` is only available once a base URL
/// has been set.
///
/// # Example
///
/// ```ignore
/// let client = OnboardClient::builder()
///     .url("http://10.0.2.2:9999")
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub struct OnboardClientBuilder<U> {
    url: U,
    endpoints: Endpoints,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl OnboardClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            endpoints: Endpoints::default(),
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the API base URL.
    pub fn url(self, url: impl Into<String>) -> OnboardClientBuilder<Set<String>> {
        OnboardClientBuilder {
            url: Set(url.into()),
            endpoints: self.endpoints,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for OnboardClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> OnboardClientBuilder<U> {
    /// Overrides the endpoint paths.
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl OnboardClientBuilder<Set<String>> {
    /// Builds the [`OnboardClient`].
    ///
    /// Fails if the base URL is not an absolute http(s) URL.
    pub fn build(self) -> Result<OnboardClient, ApiError> {
        let base_url = self.url.0;
        match Url::parse(&base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return Err(ApiError::InvalidUrl(base_url)),
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(ApiError::Network)?
            }
        };

        Ok(OnboardClient {
            inner: Arc::new(OnboardClientInner {
                base_url,
                endpoints: self.endpoints,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}
