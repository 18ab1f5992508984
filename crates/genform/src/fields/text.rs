//! Text-like field helpers.

use crate::schema::{FieldDescriptor, FieldKind, Value};
use crate::validation::{Bound, ValidationOptions};

/// Read-only field showing `value`.
pub fn show_field(key: &str, value: impl Into<Value>) -> FieldDescriptor {
    FieldDescriptor::new(key, FieldKind::Show).initial(value)
}

/// Single-line text input.
pub fn text_field(key: &str, required: bool) -> FieldDescriptor {
    FieldDescriptor::new(key, FieldKind::Text)
        .style("text")
        .options(ValidationOptions::new().required(required))
}

/// Password input; always required.
pub fn password_field(key: &str) -> FieldDescriptor {
    FieldDescriptor::new(key, FieldKind::Password).style("text")
}

/// Multi-line text input with `rows` rows.
pub fn text_area_field(key: &str, rows: usize, required: bool) -> FieldDescriptor {
    let mut field = text_field(key, required);
    field.kind = FieldKind::TextArea;
    field.props.rows = Some(rows);
    field
}

/// Text input validated as an email address.
pub fn email_field(key: &str, required: bool) -> FieldDescriptor {
    FieldDescriptor::new(key, FieldKind::Text)
        .style("email")
        .options(ValidationOptions::new().required(required))
}

/// Text input validated as a phone number.
pub fn phone_field(key: &str, required: bool) -> FieldDescriptor {
    FieldDescriptor::new(key, FieldKind::Text)
        .style("phone")
        .options(ValidationOptions::new().required(required))
}

/// Text input validated as an http(s) URL.
pub fn url_field(key: &str, required: bool) -> FieldDescriptor {
    FieldDescriptor::new(key, FieldKind::Text)
        .style("url")
        .options(ValidationOptions::new().required(required))
        .placeholder("https://")
}

/// Number input with optional inclusive bounds.
pub fn number_field(key: &str, min: Option<f64>, max: Option<f64>) -> FieldDescriptor {
    let options = ValidationOptions {
        min: min.map(Bound::Number),
        max: max.map(Bound::Number),
        ..ValidationOptions::default()
    };
    FieldDescriptor::new(key, FieldKind::Number)
        .style("number")
        .options(options)
}
