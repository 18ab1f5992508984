//! Field values and the value bag.

use std::borrow::Cow;
use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize, Serializer};

/// The value bag: every set field's key mapped to its current value.
///
/// Unset fields are absent. Ordered by key so the bag serializes and
/// renders identically for identical state.
pub type ValueMap = BTreeMap<String, Value>;

/// A field value as held by the form.
///
/// Deserialization tries the variants in declaration order, so JSON strings
/// always land in `Text`; the chrono variants are only produced from Rust.
/// Whole numbers serialize as integers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
    /// Selected options of a checkbox group.
    List(Vec<String>),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Value {
    /// Returns the textual form used by widgets and string-based rules.
    #[must_use]
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s.as_str()),
            Self::Number(n) => Cow::Owned(format_number(*n)),
            Self::List(items) => Cow::Owned(items.join(",")),
            Self::Date(d) => Cow::Owned(d.format("%Y-%m-%d").to_string()),
            Self::DateTime(dt) => Cow::Owned(dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
        }
    }

    /// Whether the value counts as "not filled in".
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Number(_) | Self::Date(_) | Self::DateTime(_) => false,
        }
    }

    /// Whether `option` is among the selected values.
    #[must_use]
    pub fn contains(&self, option: &str) -> bool {
        match self {
            Self::List(items) => items.iter().any(|item| item == option),
            other => other.as_text() == option,
        }
    }
}

/// True when the value is unset or empty.
#[must_use]
pub fn is_blank(value: Option<&Value>) -> bool {
    value.map_or(true, Value::is_empty)
}

fn as_whole(n: f64) -> Option<i64> {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        #[allow(clippy::cast_possible_truncation)]
        Some(n as i64)
    } else {
        None
    }
}

fn format_number(n: f64) -> String {
    as_whole(n).map_or_else(|| n.to_string(), |whole| whole.to_string())
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Number(n) => match as_whole(*n) {
                Some(whole) => serializer.serialize_i64(whole),
                None => serializer.serialize_f64(*n),
            },
            Self::Text(s) => serializer.serialize_str(s),
            Self::List(items) => items.serialize(serializer),
            Self::Date(d) => d.serialize(serializer),
            Self::DateTime(dt) => dt.serialize(serializer),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Self::DateTime(dt)
    }
}
