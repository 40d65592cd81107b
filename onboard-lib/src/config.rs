//! API configuration

use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

/// Base URL used when nothing else is configured.
///
/// `10.0.2.2` is the host machine as seen from the Android emulator.
pub const DEFAULT_BASE_URL: &str = "http://10.0.2.2:9999";

/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "ONBOARD_API_URL";

/// Environment variable holding the request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "ONBOARD_API_TIMEOUT_SECS";

/// Paths of the API endpoints, relative to the base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Login (POST).
    ///
    /// Default: `/api/auth/login`
    pub login: String,

    /// Account creation (POST).
    ///
    /// Default: `/api/users`
    pub signup: String,

    /// User list (GET).
    ///
    /// Default: `/api/users`
    pub users: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            login: "/api/auth/login".to_string(),
            signup: "/api/users".to_string(),
            users: "/api/users".to_string(),
        }
    }
}

/// Connection settings for the onboarding API.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use onboard_lib::config::ApiConfig;
///
/// let config = ApiConfig::default()
///     .with_base_url("http://localhost:9999")
///     .with_timeout(Duration::from_secs(10));
///
/// assert_eq!(config.url(&config.endpoints.login), "http://localhost:9999/api/auth/login");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Scheme, host and port of the API server.
    ///
    /// Default: [`DEFAULT_BASE_URL`]
    pub base_url: String,

    /// Endpoint paths.
    pub endpoints: Endpoints,

    /// Per-request timeout.
    ///
    /// Default: none
    pub timeout: Option<Duration>,

    /// Connection timeout applied when building the HTTP client.
    ///
    /// Default: none
    pub connect_timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoints: Endpoints::default(),
            timeout: None,
            connect_timeout: None,
        }
    }
}

impl ApiConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads defaults overridden by [`ENV_BASE_URL`] and [`ENV_TIMEOUT_SECS`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_TIMEOUT_SECS,
                value: raw.clone(),
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        config.validate()?;
        Ok(config)
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the endpoint paths.
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Checks that the base URL is an absolute http(s) URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: reason.to_string(),
        };

        let url = Url::parse(&self.base_url).map_err(|e| invalid(&e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(invalid(&format!("unsupported scheme '{}'", other))),
        }
    }

    /// Joins the base URL and an endpoint path.
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), endpoint)
    }
}
