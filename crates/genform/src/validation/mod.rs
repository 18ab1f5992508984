//! Validation rule engine.
//!
//! Built-in rules are keyed by [`ValidationStyle`]: text, number, email,
//! phone, url, date and datetime. Each is a pure function of the field
//! descriptor and the candidate value, so rules can be called directly
//! without building a form:
//!
//! ```rust
//! use genform::schema::{FieldDescriptor, FieldKind, Value};
//! use genform::validation::{rules, ValidationOptions};
//! use genform::ErrorKind;
//!
//! let age = FieldDescriptor::new("age", FieldKind::Number)
//!     .options(ValidationOptions::new().min(10).max(12));
//!
//! assert!(rules::number(&age, Some(&Value::from("11"))).is_ok());
//! let err = rules::number(&age, Some(&Value::from("9"))).unwrap_err();
//! assert_eq!(err.kind, ErrorKind::BelowMinimum);
//! ```

pub mod date_format;
mod options;
pub mod rules;

pub use date_format::DateFormat;
pub use options::{
    Bound, FieldValidation, ValidateFn, ValidationMessages, ValidationOptions, ValidationStyle,
};

use crate::error::FieldError;
use crate::schema::{FieldDescriptor, Value};

/// Trait for field validators.
pub trait Validator: Send + Sync {
    /// Validates a candidate value for `field`.
    fn validate(&self, field: &FieldDescriptor, value: Option<&Value>) -> Result<(), FieldError>;
}

impl Validator for ValidationStyle {
    fn validate(&self, field: &FieldDescriptor, value: Option<&Value>) -> Result<(), FieldError> {
        rules::validate(self, field, value)
    }
}
