//! Account creation request.

use onboard_forms::{FieldName, FormValues};
use serde::Serialize;

/// Message used when signup fails without a server message.
pub const SIGNUP_FAILED: &str = "Failed to create account. Please try again.";

/// Body of `POST /api/users`.
///
/// Values are sent as entered; `dob` is `YYYY-MM-DD` or empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub dob: String,
    pub address: String,
    pub country: String,
    pub email: String,
    pub phone: String,
}

impl SignupRequest {
    /// Builds a request from signup form values.
    pub fn from_form(values: &FormValues) -> Self {
        let text = |field| values.text(field).to_string();
        Self {
            username: text(FieldName::Username),
            password: text(FieldName::Password),
            full_name: text(FieldName::FullName),
            dob: values
                .date_of_birth()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            address: text(FieldName::Address),
            country: text(FieldName::Country),
            email: text(FieldName::Email),
            phone: text(FieldName::PhoneNumber),
        }
    }
}
