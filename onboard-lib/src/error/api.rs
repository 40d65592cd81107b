//! API error types

use std::time::Duration;

use crate::response::ErrorBody;

/// Shown when the server cannot be reached.
pub const CONNECTION_MESSAGE: &str = "Unable to connect to server. Please check your connection.";

/// Shown for failures that are neither connectivity nor readable server
/// errors, unless the caller supplies its own fallback.
pub const GENERIC_MESSAGE: &str = "An error occurred. Please try again later.";

/// Errors that can occur during API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-success HTTP response from the API.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Normalized error message.
        message: String,
        /// Parsed error body, if the server sent JSON.
        body: Option<Box<ErrorBody>>,
    },

    /// Network error during API call.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Request timed out.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse API response.
    #[error("Response parse error: {message}")]
    Parse {
        /// HTTP status, when the unreadable body came with a non-success
        /// status.
        status: Option<u16>,
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

impl ApiError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
            body: None,
        }
    }

    /// Creates a new HTTP error carrying the parsed error body.
    pub fn http_with_body(status: u16, message: impl Into<String>, body: ErrorBody) -> Self {
        Self::Http {
            status,
            message: message.into(),
            body: Some(Box::new(body)),
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            status: None,
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Creates a parse error for a non-success reply whose body is not JSON.
    pub fn unreadable_rejection(status: u16, message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            status: Some(status),
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the HTTP status code, if a response was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Parse { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns the parsed error body if available.
    pub fn error_body(&self) -> Option<&ErrorBody> {
        match self {
            Self::Http { body, .. } => body.as_deref(),
            _ => None,
        }
    }

    /// Returns `true` if the server could not be reached.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout(_))
    }

    /// Message suitable for an alert on screen, with [`GENERIC_MESSAGE`] for
    /// failures that carry no server message.
    pub fn user_message(&self) -> &str {
        self.alert_message(GENERIC_MESSAGE)
    }

    /// Like [`user_message`](Self::user_message), but with a caller-chosen
    /// `fallback` for failures that carry no server message.
    pub fn alert_message<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self {
            Self::Http { message, .. } => message,
            Self::Network(_) | Self::Timeout(_) => CONNECTION_MESSAGE,
            Self::InvalidUrl(_) | Self::Parse { .. } => fallback,
        }
    }

    /// Maps a transport error, keeping timeouts distinct.
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Option<Duration>) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout.unwrap_or_default())
        } else {
            Self::Network(err)
        }
    }
}
