//! Login request and failure mapping.

use onboard_forms::{FieldName, FormErrors, FormValues};
use serde::Serialize;

use crate::error::ApiError;
use crate::response::ErrorBody;

/// Message used when a rejected login carries no server message.
pub const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";

/// Email-side message shown alongside a credentials failure.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username_or_email: String,
    pub password: String,
}

impl LoginRequest {
    /// Builds a request; the identifier is trimmed, the password is sent as typed.
    pub fn new(username_or_email: &str, password: impl Into<String>) -> Self {
        Self {
            username_or_email: username_or_email.trim().to_string(),
            password: password.into(),
        }
    }

    /// Builds a request from login form values.
    pub fn from_form(values: &FormValues) -> Self {
        Self::new(
            values.text(FieldName::Email),
            values.text(FieldName::Password),
        )
    }
}

/// Maps a rejected login to errors for the email and password inputs.
///
/// Field errors sent by the server are used first. The overall message is
/// then attached to the field it mentions; credential failures go on the
/// password with a generic email hint, and anything unattributable lands on
/// the password.
pub fn field_errors(body: &ErrorBody) -> FormErrors {
    let mut errors = FormErrors::new();
    if let Some(msg) = body.field("email") {
        errors.insert(FieldName::Email, msg);
    }
    if let Some(msg) = body.field("password") {
        errors.insert(FieldName::Password, msg);
    }

    let message = body.message_or(LOGIN_FAILED);
    let lower = message.to_lowercase();

    if lower.contains("email") && !errors.contains(FieldName::Email) {
        errors.insert(FieldName::Email, message);
    } else if lower.contains("password") && !errors.contains(FieldName::Password) {
        errors.insert(FieldName::Password, message);
    } else if lower.contains("credential") || lower.contains("invalid") {
        errors.insert(FieldName::Password, message);
        if !errors.contains(FieldName::Email) {
            errors.insert(FieldName::Email, INVALID_CREDENTIALS);
        }
    } else if errors.is_empty() {
        errors.insert(FieldName::Password, message);
    }

    errors
}

/// Field errors for a failed login call, or `None` for transport failures
/// and unreadable replies that should be shown as an alert instead.
pub fn failure_field_errors(err: &ApiError) -> Option<FormErrors> {
    match err {
        ApiError::Http { body, .. } => Some(field_errors(
            body.as_deref().unwrap_or(&ErrorBody::default()),
        )),
        _ => None,
    }
}
