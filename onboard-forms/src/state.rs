//! Live form state for a screen.

use chrono::NaiveDate;

use crate::field::{FieldName, FieldValue, FormValues};
use crate::form;
use crate::policy::Policy;
use crate::validation::{FormErrors, ValidationResult};

/// Values and errors of one form while the user is editing it.
///
/// Starts empty. Every change and blur re-validates the touched field, so
/// [`errors`](Self::errors) always reflects what the screen should show.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use onboard_forms::{FieldName, FormState, Policy};
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
/// let mut form = FormState::new(Policy::Login);
///
/// form.change(FieldName::Email, "bad", today);
/// assert_eq!(form.error(FieldName::Email), Some("Please enter a valid email address"));
///
/// form.change(FieldName::Email, "me@example.com", today);
/// assert_eq!(form.error(FieldName::Email), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormState {
    policy: Policy,
    values: FormValues,
    errors: FormErrors,
}

impl FormState {
    /// Creates an empty form for a policy.
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            values: FormValues::new(),
            errors: FormErrors::new(),
        }
    }

    /// Creates a form pre-filled with `values`. Nothing is validated until
    /// the first change, blur or [`validate_all`](Self::validate_all).
    pub fn with_values(policy: Policy, values: FormValues) -> Self {
        Self {
            policy,
            values,
            errors: FormErrors::new(),
        }
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// Current error message for a field.
    pub fn error(&self, field: FieldName) -> Option<&str> {
        self.errors.get(field)
    }

    /// Stores a new value for `field` and re-validates it.
    pub fn change(
        &mut self,
        field: FieldName,
        value: impl Into<FieldValue>,
        today: NaiveDate,
    ) -> ValidationResult {
        self.values.set(field, value);
        self.revalidate(field, today)
    }

    /// Re-validates the stored value when `field` loses focus.
    pub fn blur(&mut self, field: FieldName, today: NaiveDate) -> ValidationResult {
        self.revalidate(field, today)
    }

    fn revalidate(&mut self, field: FieldName, today: NaiveDate) -> ValidationResult {
        let result = self.policy.validate(field, &self.values.get(field), today);
        self.errors.record(field, result.clone());
        result
    }

    /// Validates the whole form, replacing all errors.
    ///
    /// Returns `true` when no field has an error.
    pub fn validate_all(&mut self, today: NaiveDate) -> bool {
        self.errors = form::validate_form(self.policy, &self.values, today);
        log::debug!(
            "{:?} form validated with {} error(s)",
            self.policy,
            self.errors.len()
        );
        self.errors.is_empty()
    }

    /// Whether the submit action should be enabled.
    pub fn is_submittable(&self, today: NaiveDate) -> bool {
        form::is_submittable(self.policy, &self.values, today)
    }

    /// Overlays errors reported by the server on top of the client-side ones.
    pub fn merge_errors(&mut self, server: FormErrors) {
        self.errors.merge(server);
    }

    /// Drops every error, e.g. after a successful submit.
    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }
}
