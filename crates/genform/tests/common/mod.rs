#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use genform::layout::{LayoutConfig, LayoutItem};
use genform::schema::{FieldDescriptor, FieldKind, FormSchema, Value, ValueMap};
use genform::validation::ValidationOptions;
use genform::Form;

/// The user profile form: every built-in kind of text-like input with
/// bounds on age and both date fields.
pub fn user_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("id", FieldKind::Show).initial("1"),
        FieldDescriptor::new("major", FieldKind::Text)
            .options(ValidationOptions::new().required_message("Blalal")),
        FieldDescriptor::new("age", FieldKind::Number)
            .style("number")
            .options(ValidationOptions::new().min(10).max(12)),
        FieldDescriptor::new("name", FieldKind::Text),
        FieldDescriptor::new("email", FieldKind::Text).style("email"),
        FieldDescriptor::new("birthday", FieldKind::Date)
            .style("date")
            .options(
                ValidationOptions::new()
                    .min("2024-09-24")
                    .max("2024-09-30")
                    .date_format("YYYY-MM-DD"),
            ),
        FieldDescriptor::new("birthdays", FieldKind::Datetime)
            .style("date")
            .options(
                ValidationOptions::new()
                    .min("2024-09-24T09:00:00")
                    .max("2024-09-30T18:00:00")
                    .date_format("YYYY-MM-DDTHH:mm:ss"),
            ),
    ]
}

pub fn user_layout() -> LayoutConfig {
    LayoutConfig::empty()
        .xl(LayoutItem::new(2, 2))
        .lg(LayoutItem::columns(2))
        .md(LayoutItem::columns(1))
}

pub fn user_schema() -> FormSchema {
    FormSchema::builder()
        .fields(user_fields())
        .layout(user_layout())
        .build()
        .unwrap_or_else(|e| panic!("user schema should build: {e}"))
}

pub const USER_SCHEMA_JSON: &str = r#"{
    "fields": [
        {"key": "id", "type": "show", "value": "1"},
        {"key": "major", "type": "text", "validation": {"options": {"messages": {"required": "Blalal"}}}},
        {"key": "age", "type": "number", "validation": {"style": "number", "options": {"min": 10, "max": 12}}},
        {"key": "name", "type": "text"},
        {"key": "email", "type": "text", "validation": {"style": "email"}},
        {"key": "birthday", "type": "date", "validation": {"style": "date", "options": {
            "min": "2024-09-24", "max": "2024-09-30", "dateFormat": "YYYY-MM-DD"}}},
        {"key": "birthdays", "type": "datetime", "validation": {"style": "date", "options": {
            "min": "2024-09-24T09:00:00", "max": "2024-09-30T18:00:00", "dateFormat": "YYYY-MM-DDTHH:mm:ss"}}}
    ],
    "layout": {"xl": {"col": 2, "gap": 2}, "lg": {"col": 2}, "md": {"col": 1}}
}"#;

/// The values a complete, valid submission carries.
pub fn valid_submission() -> ValueMap {
    [
        ("id", "1"),
        ("major", "jsj"),
        ("age", "11"),
        ("name", "Alice"),
        ("email", "a@b.com"),
        ("birthday", "2024-09-25"),
        ("birthdays", "2024-09-25T10:00:00"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), Value::from(v)))
    .collect()
}

/// A form over `schema` that records every callback invocation.
pub fn recording_form(schema: FormSchema) -> (Form, Rc<RefCell<Vec<ValueMap>>>) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    let form = Form::new(schema, move |values: ValueMap| sink.borrow_mut().push(values));
    (form, calls)
}

/// Fills `form` with `values`, panicking on unknown keys.
pub fn fill(form: &mut Form, values: &ValueMap) {
    for (key, value) in values {
        form.set_value(key, value.clone())
            .unwrap_or_else(|e| panic!("failed to set {key}: {e}"));
    }
}
