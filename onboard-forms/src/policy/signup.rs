//! Signup form rules.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::age::age_on;
use crate::field::{FieldName, FieldValue};
use crate::validation::{RuleChain, ValidationResult};

/// Countries offered by the signup screen's country picker.
pub const COUNTRIES: [&str; 5] = ["India", "Thailand", "Singapore", "Malaysia", "UAE"];

/// Characters that satisfy the password's special-character rule.
pub const PASSWORD_SPECIAL_CHARS: &str = r#"!@#$%^&*()_+-=[]{};':"\|,.<>/?"#;

pub const MIN_AGE: i32 = 18;
pub const MAX_AGE: i32 = 120;

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("Invalid regex pattern"));

static FULL_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("Invalid regex pattern"));

pub(crate) static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex pattern"));

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+]?[(]?[0-9]{1,4}[)]?[-\s.]?[(]?[0-9]{1,4}[)]?[-\s.]?[0-9]{1,9}$")
        .expect("Invalid regex pattern")
});

fn is_password_special(c: char) -> bool {
    PASSWORD_SPECIAL_CHARS.contains(c)
}

/// Validates one signup field.
///
/// `today` is only consulted for the date of birth.
pub fn validate(field: FieldName, value: &FieldValue, today: NaiveDate) -> ValidationResult {
    match field {
        FieldName::DateOfBirth => date_of_birth(value.as_date(), today),
        _ => text_rules(field).check(value.as_text()),
    }
}

fn text_rules(field: FieldName) -> RuleChain<str> {
    match field {
        FieldName::Username => RuleChain::text()
            .required("Username is required")
            .min_length(3, "Username must be at least 3 characters")
            .pattern(&USERNAME_RE, "Username can only contain letters, numbers, and underscores"),

        FieldName::Password => RuleChain::text()
            .present("Password is required")
            .min_length(8, "Password must be at least 8 characters")
            .contains_char(
                |c| c.is_ascii_lowercase(),
                "Password must contain at least one lowercase letter",
            )
            .contains_char(
                |c| c.is_ascii_uppercase(),
                "Password must contain at least one uppercase letter",
            )
            .contains_char(
                |c| c.is_ascii_digit(),
                "Password must contain at least one number",
            )
            .contains_char(
                is_password_special,
                "Password must contain at least one special character",
            )
            // Rejects anything outside the two classes above, e.g. spaces or
            // non-ASCII letters.
            .only_chars(
                |c| c.is_ascii_alphanumeric() || is_password_special(c),
                "Password must be alphanumeric with special characters",
            ),

        FieldName::FullName => RuleChain::text()
            .required("Full Name is required")
            .min_length(2, "Full Name must be at least 2 characters")
            .pattern(&FULL_NAME_RE, "Full Name can only contain letters and spaces"),

        FieldName::Address => RuleChain::text()
            .required("Address is required")
            .min_length(10, "Address must be at least 10 characters"),

        FieldName::Country => RuleChain::text().present("Country is required"),

        FieldName::Email => email_rules(),

        FieldName::PhoneNumber => RuleChain::text()
            .required("Phone Number is required")
            .pattern(&PHONE_RE, "Please enter a valid phone number")
            .rule(
                |v| v.chars().filter(char::is_ascii_digit).count() >= 10,
                "Phone number must have at least 10 digits",
            ),

        // Dates never reach the text rules.
        FieldName::DateOfBirth => RuleChain::text(),
    }
}

/// Email rules shared by the signup and login forms.
pub(crate) fn email_rules() -> RuleChain<str> {
    RuleChain::text()
        .required("Email is required")
        .pattern(&EMAIL_RE, "Please enter a valid email address")
}

fn date_of_birth(birth: Option<NaiveDate>, today: NaiveDate) -> ValidationResult {
    RuleChain::<Option<NaiveDate>>::new()
        .rule(|d| d.is_some(), "Date of Birth is required")
        .rule(
            move |d| d.is_none_or(|d| d <= today),
            "Date of Birth cannot be in the future",
        )
        .rule(
            move |d| d.is_none_or(|d| age_on(d, today) >= MIN_AGE),
            "You must be at least 18 years old",
        )
        .rule(
            move |d| d.is_none_or(|d| age_on(d, today) <= MAX_AGE),
            "Please enter a valid date of birth",
        )
        .check(&birth)
}
