//! Input validation for the onboarding screens.
//!
//! Login and signup forms are checked field by field against fixed rule
//! chains. Validation is pure: the result depends on the field, its value and
//! the `today` date passed in (used for date-of-birth checks only).
//!
//! ```
//! use chrono::NaiveDate;
//! use onboard_forms::{FieldName, FieldValue, Policy};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
//! let result = Policy::Signup.validate(FieldName::Password, &FieldValue::from("abcdefgh"), today);
//! assert_eq!(result.message(), Some("Password must contain at least one uppercase letter"));
//! ```

pub mod age;
pub mod field;
pub mod form;
pub mod policy;
pub mod state;
pub mod validation;

pub use field::{FieldKind, FieldName, FieldValue, FormValues, UnknownField};
pub use form::{is_submittable, validate_form};
pub use policy::{COUNTRIES, Policy};
pub use state::FormState;
pub use validation::{FormErrors, ValidationResult};
