//! Date and datetime field helpers.

use crate::schema::{FieldDescriptor, FieldKind};
use crate::validation::date_format::{DEFAULT_DATETIME_FORMAT, DEFAULT_DATE_FORMAT};
use crate::validation::ValidationOptions;

fn bounded(
    key: &str,
    kind: FieldKind,
    style: &str,
    format: &str,
    min: Option<&str>,
    max: Option<&str>,
) -> FieldDescriptor {
    let mut options = ValidationOptions::new().date_format(format);
    if let Some(min) = min {
        options = options.min(min);
    }
    if let Some(max) = max {
        options = options.max(max);
    }
    FieldDescriptor::new(key, kind).style(style).options(options)
}

/// Date input in `YYYY-MM-DD` with optional inclusive bounds in the same format.
pub fn date_field(key: &str, min: Option<&str>, max: Option<&str>) -> FieldDescriptor {
    bounded(key, FieldKind::Date, "date", DEFAULT_DATE_FORMAT, min, max)
}

/// Date-and-time input in `YYYY-MM-DDTHH:mm:ss` with optional inclusive bounds.
pub fn datetime_field(key: &str, min: Option<&str>, max: Option<&str>) -> FieldDescriptor {
    bounded(
        key,
        FieldKind::Datetime,
        "datetime",
        DEFAULT_DATETIME_FORMAT,
        min,
        max,
    )
}
