//! Declarative validation configuration carried by a field descriptor.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::error::FieldError;
use crate::schema::{FieldDescriptor, Value};

/// An explicit validator supplied by the application.
///
/// Receives the descriptor and the candidate value; takes precedence over
/// any style-keyed rule.
pub type ValidateFn =
    Arc<dyn Fn(&FieldDescriptor, Option<&Value>) -> Result<(), FieldError> + Send + Sync>;

/// Style tag selecting a built-in rule.
///
/// Unknown tags are kept as `Unrecognized` rather than rejected at parse
/// time; the dispatcher decides whether that falls back to `Text` or fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum ValidationStyle {
    Text,
    Number,
    Email,
    Phone,
    Url,
    Date,
    Datetime,
    Unrecognized(String),
}

impl ValidationStyle {
    /// Returns the tag as written in schemas.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Url => "url",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Unrecognized(tag) => tag,
        }
    }

    /// Whether a built-in rule exists for this style.
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<&str> for ValidationStyle {
    fn from(tag: &str) -> Self {
        match tag {
            "text" => Self::Text,
            "number" => Self::Number,
            "email" => Self::Email,
            "phone" => Self::Phone,
            "url" => Self::Url,
            "date" => Self::Date,
            "datetime" => Self::Datetime,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for ValidationStyle {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl fmt::Display for ValidationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `min` or `max` bound: numeric for numbers, formatted text for dates.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Bound {
    Number(f64),
    Text(String),
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", Value::Number(*n).as_text()),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Bound {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Bound {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for Bound {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Bound {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Per-kind message overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidationMessages {
    pub required: Option<String>,
    pub invalid: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
}

/// Options shared by every built-in rule.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationOptions {
    /// `None` means the rule's own default.
    pub required: Option<bool>,
    pub min: Option<Bound>,
    pub max: Option<Bound>,
    pub messages: ValidationMessages,
    /// Token format for date and datetime values, e.g. `DD/MM/YYYY`.
    pub date_format: Option<String>,
}

impl ValidationOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the field is required.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Sets the inclusive lower bound.
    #[must_use]
    pub fn min(mut self, min: impl Into<Bound>) -> Self {
        self.min = Some(min.into());
        self
    }

    /// Sets the inclusive upper bound.
    #[must_use]
    pub fn max(mut self, max: impl Into<Bound>) -> Self {
        self.max = Some(max.into());
        self
    }

    /// Sets the date/datetime token format.
    #[must_use]
    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = Some(format.into());
        self
    }

    /// Overrides the message for a missing value.
    #[must_use]
    pub fn required_message(mut self, message: impl Into<String>) -> Self {
        self.messages.required = Some(message.into());
        self
    }

    /// Overrides the message for a malformed value.
    #[must_use]
    pub fn invalid_message(mut self, message: impl Into<String>) -> Self {
        self.messages.invalid = Some(message.into());
        self
    }

    /// Overrides the message for a value below `min`.
    #[must_use]
    pub fn min_message(mut self, message: impl Into<String>) -> Self {
        self.messages.min = Some(message.into());
        self
    }

    /// Overrides the message for a value above `max`.
    #[must_use]
    pub fn max_message(mut self, message: impl Into<String>) -> Self {
        self.messages.max = Some(message.into());
        self
    }

    /// `required`, falling back to the given default.
    #[must_use]
    pub fn is_required_or(&self, default: bool) -> bool {
        self.required.unwrap_or(default)
    }
}

/// The `validation` block of a descriptor.
#[derive(Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldValidation {
    pub style: Option<ValidationStyle>,
    pub options: ValidationOptions,
    #[serde(skip)]
    pub validate_fn: Option<ValidateFn>,
}

impl fmt::Debug for FieldValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldValidation")
            .field("style", &self.style)
            .field("options", &self.options)
            .field("validate_fn", &self.validate_fn.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
