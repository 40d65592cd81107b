//! Whole-form validation.

use chrono::NaiveDate;

use crate::field::FormValues;
use crate::policy::Policy;
use crate::validation::FormErrors;

/// Validates every field of the policy's form independently.
///
/// The returned map only holds the fields that failed.
pub fn validate_form(policy: Policy, values: &FormValues, today: NaiveDate) -> FormErrors {
    let mut errors = FormErrors::new();
    for &field in policy.fields() {
        errors.record(field, policy.validate(field, &values.get(field), today));
    }
    errors
}

/// Whether the form may be submitted: every field has a value and passes
/// its rules.
pub fn is_submittable(policy: Policy, values: &FormValues, today: NaiveDate) -> bool {
    policy.fields().iter().all(|&field| {
        let value = values.get(field);
        value.has_value() && policy.validate(field, &value, today).is_valid()
    })
}
