//! Error types for forms.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Schema construction and submission errors.
#[derive(Debug, Error)]
pub enum FormError {
    /// Submission was blocked by one or more invalid fields.
    #[error("validation errors: {0}")]
    Validation(ValidationErrors),

    /// A choice-like field (select, checkbox, boolean) has no options.
    #[error("field {key}: the data prop is required for {kind} fields")]
    MissingChoiceData { key: String, kind: &'static str },

    /// Two descriptors share the same key.
    #[error("duplicate field key: {0}")]
    DuplicateKey(String),

    /// A value was set for a key the schema does not declare.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// A column span exceeds the governing breakpoint under the reject policy.
    #[error("field {key}: column span {span} exceeds the {columns} available columns")]
    SpanOverflow { key: String, span: u16, columns: u16 },

    /// A validation style with no matching rule, in strict-style mode.
    #[error("field {key}: unknown validation style {style:?}")]
    UnknownValidationStyle { key: String, style: String },

    /// The accepted values could not be shaped into the caller's record type.
    #[error("failed to decode submitted values: {0}")]
    Decode(#[source] serde_json::Error),

    /// A JSON schema document could not be parsed.
    #[error("failed to parse schema: {0}")]
    Schema(#[source] serde_json::Error),
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;

/// Kind of a field-level validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Empty or unset value on a required field.
    RequiredMissing,
    /// Value failed to parse or match the expected pattern.
    InvalidFormat,
    /// Value lies below the configured minimum.
    BelowMinimum,
    /// Value lies above the configured maximum.
    AboveMaximum,
}

impl ErrorKind {
    /// Returns a short machine-friendly name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RequiredMissing => "required",
            Self::InvalidFormat => "invalid",
            Self::BelowMinimum => "min",
            Self::AboveMaximum => "max",
        }
    }
}

/// A single field validation failure: its kind and the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub kind: ErrorKind,
    pub message: String,
}

impl FieldError {
    /// Creates a new field error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates a `RequiredMissing` error.
    pub fn required(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequiredMissing, message)
    }

    /// Creates an `InvalidFormat` error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidFormat, message)
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for FieldError {}

/// Collection of validation errors by field.
///
/// Each field holds at most one error: the first rule that rejected its
/// value. Ordered by key so rendering and display are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    /// Errors keyed by field name.
    pub errors: BTreeMap<String, FieldError>,
}

impl ValidationErrors {
    /// Creates a new empty ValidationErrors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the error for a field, replacing any previous one.
    pub fn add(&mut self, field: &str, error: FieldError) {
        self.errors.insert(field.to_string(), error);
    }

    /// Clears the error for a field.
    pub fn remove(&mut self, field: &str) -> Option<FieldError> {
        self.errors.remove(field)
    }

    /// Returns whether there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of fields with errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns the error for a specific field.
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.errors.get(field)
    }

    /// Returns all errors as a flat list of (field, message).
    pub fn all_errors(&self) -> Vec<(&str, &str)> {
        self.errors
            .iter()
            .map(|(field, error)| (field.as_str(), error.message.as_str()))
            .collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {error}")?;
            first = false;
        }
        Ok(())
    }
}

impl From<ValidationErrors> for FormError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_keep_one_error_per_field() {
        let mut errors = ValidationErrors::new();
        errors.add("age", FieldError::required("first"));
        errors.add("age", FieldError::new(ErrorKind::BelowMinimum, "second"));

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("age").map(|e| e.kind), Some(ErrorKind::BelowMinimum));
    }

    #[test]
    fn test_validation_errors_display_is_ordered() {
        let mut errors = ValidationErrors::new();
        errors.add("name", FieldError::required("Name is required."));
        errors.add("age", FieldError::invalid("Enter a valid number."));

        assert_eq!(
            errors.to_string(),
            "age: Enter a valid number.; name: Name is required."
        );
        assert_eq!(
            errors.all_errors(),
            vec![("age", "Enter a valid number."), ("name", "Name is required.")]
        );
    }

    #[test]
    fn test_missing_choice_data_message() {
        let err = FormError::MissingChoiceData {
            key: "major".to_string(),
            kind: "select",
        };
        assert!(err.to_string().contains("data prop is required"));
    }
}
