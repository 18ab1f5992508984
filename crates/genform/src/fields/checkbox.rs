//! Checkbox and radio group helpers.

use crate::schema::{FieldDescriptor, FieldKind};
use crate::validation::ValidationOptions;

/// Checkbox group: any number of `choices` may be checked.
pub fn checkbox_field(key: &str, choices: &[&str], vertical: bool) -> FieldDescriptor {
    let field = FieldDescriptor::new(key, FieldKind::Checkbox)
        .choices(choices.iter().copied())
        .options(ValidationOptions::new().required(false));
    if vertical {
        field.vertical()
    } else {
        field
    }
}

/// Radio group: exactly one of `choices`.
pub fn boolean_field(key: &str, choices: &[&str], vertical: bool) -> FieldDescriptor {
    let field = FieldDescriptor::new(key, FieldKind::Boolean).choices(choices.iter().copied());
    if vertical {
        field.vertical()
    } else {
        field
    }
}
