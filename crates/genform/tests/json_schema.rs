//! Tests for loading schemas from JSON documents.

mod common;

use common::{fill, recording_form, user_fields, user_schema, valid_submission, USER_SCHEMA_JSON};
use genform::dispatch::{resolve_validator, ValidatorSource};
use genform::schema::{FieldKind, FormSchema};
use genform::validation::ValidationStyle;
use genform::{FormError, Theme};

#[test]
fn test_json_schema_matches_builder_schema() {
    let from_json = FormSchema::from_json(USER_SCHEMA_JSON).unwrap();
    let built = user_schema();

    assert_eq!(from_json.layout(), built.layout());
    let keys = |s: &FormSchema| -> Vec<String> { s.fields().iter().map(|f| f.key.clone()).collect() };
    assert_eq!(keys(&from_json), keys(&built));

    let (a, _) = recording_form(from_json);
    let (b, _) = recording_form(built);
    let theme = Theme::default();
    assert_eq!(a.render(&theme).unwrap(), b.render(&theme).unwrap());
}

#[test]
fn test_json_schema_accepts_valid_submission() {
    let (mut form, calls) = recording_form(FormSchema::from_json(USER_SCHEMA_JSON).unwrap());
    fill(&mut form, &valid_submission());

    form.submit().unwrap();
    assert_eq!(calls.borrow().as_slice(), [valid_submission()]);
}

#[test]
fn test_validator_sources_are_observable() {
    let sources: Vec<(String, ValidatorSource)> = user_fields()
        .iter()
        .map(|f| (f.key.clone(), resolve_validator(f).source().clone()))
        .collect();

    assert_eq!(sources[0], ("id".to_string(), ValidatorSource::Fallback));
    assert_eq!(
        sources[2],
        (
            "age".to_string(),
            ValidatorSource::Style(ValidationStyle::Number)
        )
    );
    assert_eq!(
        sources[6],
        (
            "birthdays".to_string(),
            ValidatorSource::Style(ValidationStyle::Date)
        )
    );
}

#[test]
fn test_kinds_parse_from_kebab_case() {
    let schema = FormSchema::from_json(
        r#"{"fields": [
            {"key": "bio", "type": "text-area"},
            {"key": "secret", "type": "password"},
            {"key": "gender", "type": "boolean", "data": ["male", "female"]}
        ]}"#,
    )
    .unwrap();
    let kinds: Vec<FieldKind> = schema.fields().iter().map(|f| f.kind).collect();
    assert_eq!(
        kinds,
        [FieldKind::TextArea, FieldKind::Password, FieldKind::Boolean]
    );
}

#[test]
fn test_unknown_style_is_lenient_unless_strict() {
    let doc = |strict: bool| {
        format!(
            r#"{{"strictStyles": {strict}, "fields": [
                {{"key": "zip", "type": "text", "validation": {{"style": "postcode"}}}}
            ]}}"#
        )
    };

    let lenient = FormSchema::from_json(&doc(false)).unwrap();
    let zip = lenient.field("zip").unwrap();
    assert_eq!(resolve_validator(zip).source(), &ValidatorSource::Fallback);

    assert!(matches!(
        FormSchema::from_json(&doc(true)),
        Err(FormError::UnknownValidationStyle { .. })
    ));
}

#[test]
fn test_overflow_policy_from_json() {
    let err = FormSchema::from_json(
        r#"{
            "layout": {"lg": {"col": 2}, "overflow": "reject"},
            "fields": [{"key": "bio", "type": "text-area", "colspan": 3}]
        }"#,
    )
    .unwrap_err();
    assert!(matches!(err, FormError::SpanOverflow { span: 3, columns: 2, .. }));
}

#[test]
fn test_malformed_documents_are_schema_errors() {
    assert!(matches!(
        FormSchema::from_json(r#"{"fields": [{"key": "x", "type": "slider"}]}"#),
        Err(FormError::Schema(_))
    ));
    assert!(matches!(
        FormSchema::from_json(r#"{"fields": [{"type": "text"}]}"#),
        Err(FormError::Schema(_))
    ));
}
