//! Per-screen rule sets.
//!
//! The login and signup screens share field names but not rules: login only
//! asks for a 6+ character password, signup enforces the full strength
//! policy. [`Policy`] picks the rule set and the fields that make up the form.

pub mod login;
pub mod signup;

use chrono::NaiveDate;

use crate::field::{FieldName, FieldValue};
use crate::validation::ValidationResult;

pub use signup::COUNTRIES;

/// Which screen's rules to apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Policy {
    #[default]
    Signup,
    Login,
}

impl Policy {
    /// Fields that make up this policy's form, in display order.
    pub fn fields(self) -> &'static [FieldName] {
        match self {
            Self::Signup => &FieldName::ALL,
            Self::Login => &[FieldName::Email, FieldName::Password],
        }
    }

    /// Whether `field` is part of this policy's form.
    pub fn includes(self, field: FieldName) -> bool {
        self.fields().contains(&field)
    }

    /// Validates a single field value.
    ///
    /// `today` anchors date-of-birth checks; pass the same date to get the
    /// same result.
    pub fn validate(self, field: FieldName, value: &FieldValue, today: NaiveDate) -> ValidationResult {
        let result = match self {
            Self::Signup => signup::validate(field, value, today),
            Self::Login => login::validate(field, value),
        };
        log::trace!("{:?} {} -> {:?}", self, field, result);
        result
    }
}
