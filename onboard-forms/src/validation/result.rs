use std::collections::BTreeMap;

use serde::Serialize;

use crate::field::FieldName;

/// Outcome of running one field's rule chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ValidationResult {
    /// Every rule passed.
    #[default]
    Valid,
    /// The first failing rule's message.
    Invalid(String),
}

impl ValidationResult {
    /// Check if the field passed validation.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Check if the field failed validation.
    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// Get the error message (if any).
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid(msg) => Some(msg),
        }
    }

    /// Converts into the message, consuming the result.
    pub fn into_message(self) -> Option<String> {
        match self {
            Self::Valid => None,
            Self::Invalid(msg) => Some(msg),
        }
    }
}

/// A single field error, as yielded by [`FormErrors::iter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError<'a> {
    pub field: FieldName,
    pub message: &'a str,
}

/// Current error message per field.
///
/// A field without an entry has no error. Entries iterate in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors {
    errors: BTreeMap<FieldName, String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a field's result: stores the message when invalid, clears the
    /// entry when valid.
    pub fn record(&mut self, field: FieldName, result: ValidationResult) {
        match result.into_message() {
            Some(msg) => {
                self.errors.insert(field, msg);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    /// Sets an error message for a field, replacing any existing one.
    pub fn insert(&mut self, field: FieldName, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    /// Removes a field's error.
    pub fn remove(&mut self, field: FieldName) -> Option<String> {
        self.errors.remove(&field)
    }

    /// Get a field's error message (if any).
    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Check if a field has an error.
    pub fn contains(&self, field: FieldName) -> bool {
        self.errors.contains_key(&field)
    }

    /// The result for a field.
    pub fn result(&self, field: FieldName) -> ValidationResult {
        match self.errors.get(&field) {
            Some(msg) => ValidationResult::Invalid(msg.clone()),
            None => ValidationResult::Valid,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// All errors, in form order.
    pub fn iter(&self) -> impl Iterator<Item = FieldError<'_>> {
        self.errors.iter().map(|(field, message)| FieldError {
            field: *field,
            message,
        })
    }

    /// Get the first error in form order (if any).
    pub fn first_error(&self) -> Option<FieldError<'_>> {
        self.iter().next()
    }

    /// Overlays `other` on top of these errors; messages in `other` win.
    pub fn merge(&mut self, other: FormErrors) {
        self.errors.extend(other.errors);
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }
}

impl FromIterator<(FieldName, String)> for FormErrors {
    fn from_iter<I: IntoIterator<Item = (FieldName, String)>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}
