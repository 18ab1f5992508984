//! Built-in validation rules, one per style.
//!
//! Every rule is a plain function of the descriptor and the candidate value.
//! Rules read their bounds, messages and formats from
//! `descriptor.validation.options`.

use std::sync::LazyLock;

use chrono::{NaiveDateTime, NaiveTime};
use regex::Regex;
use tracing::warn;

use super::date_format::{DateFormat, DEFAULT_DATETIME_FORMAT, DEFAULT_DATE_FORMAT};
use super::options::{Bound, ValidationOptions, ValidationStyle};
use crate::error::{ErrorKind, FieldError};
use crate::schema::{FieldDescriptor, Value};

/// Signature shared by all built-in rules.
pub type Rule = fn(&FieldDescriptor, Option<&Value>) -> Result<(), FieldError>;

/// Message used when a required value is missing and no override is set.
pub const DEFAULT_REQUIRED_MESSAGE: &str = "This field is required.";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email pattern")
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s().-]{7,20}$").expect("valid phone pattern"));

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?)*(:[0-9]{1,5})?([/?#]\S*)?$",
    )
    .expect("valid url pattern")
});

/// Looks up the rule for a style. `None` for unrecognized tags.
#[must_use]
pub fn rule_for(style: &ValidationStyle) -> Option<Rule> {
    let rule: Rule = match style {
        ValidationStyle::Text => text,
        ValidationStyle::Number => number,
        ValidationStyle::Email => email,
        ValidationStyle::Phone => phone,
        ValidationStyle::Url => url,
        ValidationStyle::Date => date,
        ValidationStyle::Datetime => datetime,
        ValidationStyle::Unrecognized(_) => return None,
    };
    Some(rule)
}

/// Runs the rule for `style`, using `text` for unrecognized tags.
pub fn validate(
    style: &ValidationStyle,
    field: &FieldDescriptor,
    value: Option<&Value>,
) -> Result<(), FieldError> {
    rule_for(style).unwrap_or(text)(field, value)
}

/// Required-only check. Required unless `options.required` is `false`.
pub fn text(field: &FieldDescriptor, value: Option<&Value>) -> Result<(), FieldError> {
    match present(value) {
        Some(_) => Ok(()),
        None => missing(options(field), true),
    }
}

/// Numeric value within the inclusive `min`/`max` bounds.
pub fn number(field: &FieldDescriptor, value: Option<&Value>) -> Result<(), FieldError> {
    let opts = options(field);
    let Some(value) = present(value) else {
        return missing(opts, true);
    };

    let parsed = match value {
        Value::Number(n) => Some(*n),
        other => other.as_text().trim().parse::<f64>().ok(),
    };
    let Some(n) = parsed.filter(|n| n.is_finite()) else {
        return Err(FieldError::invalid(
            opts.messages
                .invalid
                .clone()
                .unwrap_or_else(|| "Enter a valid number.".to_string()),
        ));
    };

    if let Some((bound, min)) = numeric_bound(field, opts.min.as_ref()) {
        if n < min {
            return Err(FieldError::new(
                ErrorKind::BelowMinimum,
                opts.messages.min.clone().unwrap_or_else(|| {
                    format!("Ensure this value is greater than or equal to {bound}.")
                }),
            ));
        }
    }

    if let Some((bound, max)) = numeric_bound(field, opts.max.as_ref()) {
        if n > max {
            return Err(FieldError::new(
                ErrorKind::AboveMaximum,
                opts.messages.max.clone().unwrap_or_else(|| {
                    format!("Ensure this value is less than or equal to {bound}.")
                }),
            ));
        }
    }

    Ok(())
}

/// Required (by default) and shaped like an email address.
pub fn email(field: &FieldDescriptor, value: Option<&Value>) -> Result<(), FieldError> {
    let opts = options(field);
    let Some(value) = present(value) else {
        return missing(opts, true);
    };
    matches_pattern(&EMAIL_RE, value, opts, "Enter a valid email address.")
}

/// Phone number pattern. Empty values pass unless `required` is set.
pub fn phone(field: &FieldDescriptor, value: Option<&Value>) -> Result<(), FieldError> {
    let opts = options(field);
    let Some(value) = present(value) else {
        return missing(opts, false);
    };
    let text = value.as_text();
    let digits = text.chars().filter(char::is_ascii_digit).count();
    if digits < 7 {
        return Err(FieldError::invalid(invalid_message(
            opts,
            "Enter a valid phone number.",
        )));
    }
    matches_pattern(&PHONE_RE, value, opts, "Enter a valid phone number.")
}

/// Absolute http(s) URL. Empty values pass unless `required` is set.
pub fn url(field: &FieldDescriptor, value: Option<&Value>) -> Result<(), FieldError> {
    let opts = options(field);
    let Some(value) = present(value) else {
        return missing(opts, false);
    };
    matches_pattern(&URL_RE, value, opts, "Enter a valid URL.")
}

/// Date parsed with `date_format` (default `YYYY-MM-DD`), compared chronologically.
pub fn date(field: &FieldDescriptor, value: Option<&Value>) -> Result<(), FieldError> {
    temporal(field, value, DEFAULT_DATE_FORMAT, "date")
}

/// Like [`date`], with the default format `YYYY-MM-DDTHH:mm:ss`.
pub fn datetime(field: &FieldDescriptor, value: Option<&Value>) -> Result<(), FieldError> {
    temporal(field, value, DEFAULT_DATETIME_FORMAT, "date and time")
}

fn temporal(
    field: &FieldDescriptor,
    value: Option<&Value>,
    default_format: &str,
    noun: &str,
) -> Result<(), FieldError> {
    let opts = options(field);
    let Some(value) = present(value) else {
        return missing(opts, true);
    };

    let date_format = DateFormat::new(opts.date_format.as_deref().unwrap_or(default_format));
    let instant = match value {
        Value::Date(d) => Some(d.and_time(NaiveTime::MIN)),
        Value::DateTime(dt) => Some(*dt),
        other => date_format.parse(&other.as_text()),
    };
    let Some(instant) = instant else {
        return Err(FieldError::invalid(invalid_message(
            opts,
            &format!("Enter a valid {noun} ({}).", date_format.tokens()),
        )));
    };

    if let Some((bound, min)) = temporal_bound(field, opts.min.as_ref(), &date_format) {
        if instant < min {
            return Err(FieldError::new(
                ErrorKind::BelowMinimum,
                opts.messages
                    .min
                    .clone()
                    .unwrap_or_else(|| format!("Ensure this {noun} is on or after {bound}.")),
            ));
        }
    }

    if let Some((bound, max)) = temporal_bound(field, opts.max.as_ref(), &date_format) {
        if instant > max {
            return Err(FieldError::new(
                ErrorKind::AboveMaximum,
                opts.messages
                    .max
                    .clone()
                    .unwrap_or_else(|| format!("Ensure this {noun} is on or before {bound}.")),
            ));
        }
    }

    Ok(())
}

fn options(field: &FieldDescriptor) -> &ValidationOptions {
    &field.validation.options
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_empty())
}

fn missing(opts: &ValidationOptions, required_by_default: bool) -> Result<(), FieldError> {
    if opts.is_required_or(required_by_default) {
        Err(FieldError::required(
            opts.messages
                .required
                .clone()
                .unwrap_or_else(|| DEFAULT_REQUIRED_MESSAGE.to_string()),
        ))
    } else {
        Ok(())
    }
}

fn invalid_message(opts: &ValidationOptions, default: &str) -> String {
    opts.messages
        .invalid
        .clone()
        .unwrap_or_else(|| default.to_string())
}

fn matches_pattern(
    pattern: &Regex,
    value: &Value,
    opts: &ValidationOptions,
    default: &str,
) -> Result<(), FieldError> {
    if pattern.is_match(value.as_text().trim()) {
        Ok(())
    } else {
        Err(FieldError::invalid(invalid_message(opts, default)))
    }
}

fn numeric_bound<'a>(field: &FieldDescriptor, bound: Option<&'a Bound>) -> Option<(&'a Bound, f64)> {
    let bound = bound?;
    let n = match bound {
        Bound::Number(n) => Some(*n),
        Bound::Text(s) => s.trim().parse::<f64>().ok(),
    };
    if n.is_none() {
        warn!(field = %field.key, %bound, "ignoring non-numeric bound");
    }
    n.map(|n| (bound, n))
}

fn temporal_bound<'a>(
    field: &FieldDescriptor,
    bound: Option<&'a Bound>,
    format: &DateFormat,
) -> Option<(&'a Bound, NaiveDateTime)> {
    let bound = bound?;
    let instant = match bound {
        Bound::Text(s) => format.parse(s),
        Bound::Number(_) => None,
    };
    if instant.is_none() {
        warn!(
            field = %field.key,
            %bound,
            format = format.tokens(),
            "ignoring date bound that does not match the field format"
        );
    }
    instant.map(|i| (bound, i))
}
