//! Form fields and their values.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One named input slot in the onboarding forms.
///
/// The declaration order is the order fields appear on the signup screen,
/// which is also the iteration order of [`FormValues`] and `FormErrors`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    Username,
    Password,
    FullName,
    DateOfBirth,
    Address,
    Country,
    Email,
    PhoneNumber,
}

impl FieldName {
    /// Every field, in form order.
    pub const ALL: [FieldName; 8] = [
        FieldName::Username,
        FieldName::Password,
        FieldName::FullName,
        FieldName::DateOfBirth,
        FieldName::Address,
        FieldName::Country,
        FieldName::Email,
        FieldName::PhoneNumber,
    ];

    /// The camelCase key used by the screens and the API.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Password => "password",
            Self::FullName => "fullName",
            Self::DateOfBirth => "dateOfBirth",
            Self::Address => "address",
            Self::Country => "country",
            Self::Email => "email",
            Self::PhoneNumber => "phoneNumber",
        }
    }

    /// Human-readable label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Self::Username => "Username",
            Self::Password => "Password",
            Self::FullName => "Full Name",
            Self::DateOfBirth => "Date of Birth",
            Self::Address => "Address",
            Self::Country => "Country",
            Self::Email => "Email",
            Self::PhoneNumber => "Phone Number",
        }
    }

    /// The kind of value this field holds.
    pub fn kind(self) -> FieldKind {
        match self {
            Self::DateOfBirth => FieldKind::Date,
            _ => FieldKind::Text,
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown field name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for FieldName {
    type Err = UnknownField;

    /// Accepts the camelCase key, or the kebab/snake-case spelling used on
    /// the command line (`full-name`, `date_of_birth`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        FieldName::ALL
            .into_iter()
            .find(|field| field.as_str().to_lowercase() == normalized)
            .or(match normalized.as_str() {
                "dob" => Some(FieldName::DateOfBirth),
                "phone" => Some(FieldName::PhoneNumber),
                _ => None,
            })
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Value kind for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Date,
}

/// The current value of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Date(Option<NaiveDate>),
}

impl FieldValue {
    /// The empty value for a field kind.
    pub fn empty(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text => Self::Text(String::new()),
            FieldKind::Date => Self::Date(None),
        }
    }

    /// Text content; a date value reads as empty text.
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text(s) => s,
            Self::Date(_) => "",
        }
    }

    /// Date content; a text value reads as no date.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => *d,
            Self::Text(_) => None,
        }
    }

    /// Whether the field counts as filled in for submission.
    ///
    /// Dates must be present; text must be non-blank after trimming.
    pub fn has_value(&self) -> bool {
        match self {
            Self::Text(s) => !s.trim().is_empty(),
            Self::Date(d) => d.is_some(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(Some(value))
    }
}

impl From<Option<NaiveDate>> for FieldValue {
    fn from(value: Option<NaiveDate>) -> Self {
        Self::Date(value)
    }
}

/// Current values of a form, keyed by field.
///
/// Missing entries read as the empty value for the field's kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    values: BTreeMap<FieldName, FieldValue>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value.
    pub fn set(&mut self, field: FieldName, value: impl Into<FieldValue>) {
        self.values.insert(field, value.into());
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, field: FieldName, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    /// Returns the value of a field, or its empty value.
    pub fn get(&self, field: FieldName) -> FieldValue {
        self.values
            .get(&field)
            .cloned()
            .unwrap_or_else(|| FieldValue::empty(field.kind()))
    }

    /// Text of a field (empty when unset).
    pub fn text(&self, field: FieldName) -> &str {
        self.values.get(&field).map(FieldValue::as_text).unwrap_or("")
    }

    /// The date of birth, if set.
    pub fn date_of_birth(&self) -> Option<NaiveDate> {
        self.values
            .get(&FieldName::DateOfBirth)
            .and_then(FieldValue::as_date)
    }
}
