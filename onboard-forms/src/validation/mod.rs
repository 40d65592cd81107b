//! Rule chains and validation results.
//!
//! Each field is checked by a [`RuleChain`]: an ordered list of predicates
//! where the first failure produces the field's message.
//!
//! # Example
//!
//! ```
//! use onboard_forms::validation::{RuleChain, ValidationResult};
//!
//! let result = RuleChain::text()
//!     .required("Address is required")
//!     .min_length(10, "Address must be at least 10 characters")
//!     .check("12 Main St");
//!
//! assert_eq!(result, ValidationResult::Valid);
//! ```

mod result;
mod validator;

pub use result::{FieldError, FormErrors, ValidationResult};
pub use validator::RuleChain;
