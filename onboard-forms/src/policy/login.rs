//! Login form rules.
//!
//! Login only checks that credentials look plausible before they are sent;
//! the password strength rules apply at signup.

use crate::field::{FieldName, FieldValue};
use crate::validation::{RuleChain, ValidationResult};

use super::signup::email_rules;

/// Validates one login field. Fields outside the login form are always valid.
pub fn validate(field: FieldName, value: &FieldValue) -> ValidationResult {
    match field {
        FieldName::Email => email_rules().check(value.as_text()),
        FieldName::Password => RuleChain::text()
            .required("Password is required")
            .min_length(6, "Password must be at least 6 characters")
            .check(value.as_text()),
        _ => ValidationResult::Valid,
    }
}
