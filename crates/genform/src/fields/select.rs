//! Select field helper.

use crate::schema::{FieldDescriptor, FieldKind};
use crate::validation::ValidationOptions;

/// Single-choice dropdown over `choices`.
pub fn select_field(key: &str, choices: &[&str], required: bool) -> FieldDescriptor {
    FieldDescriptor::new(key, FieldKind::Select)
        .choices(choices.iter().copied())
        .options(ValidationOptions::new().required(required))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_field() {
        let field = select_field("role", &["user", "admin"], true);
        assert_eq!(field.kind, FieldKind::Select);
        assert_eq!(field.choice_data, vec!["user", "admin"]);
        assert!(field.ensure_choice_data().is_ok());
    }

    #[test]
    fn test_select_field_without_choices() {
        assert!(select_field("role", &[], true).ensure_choice_data().is_err());
    }
}
