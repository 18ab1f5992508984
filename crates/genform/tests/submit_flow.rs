//! Tests for submission: the exact accepted value bag, blocked submissions,
//! validator overrides and typed records.

mod common;

use common::{fill, recording_form, user_schema, valid_submission};
use genform::schema::{FieldDescriptor, FieldKind, FormSchema, Value};
use genform::validation::ValidationOptions;
use genform::{ErrorKind, FieldError, FieldStatus, Form, FormError};
use serde::Deserialize;

#[test]
fn test_valid_submission_invokes_callback_once_with_exact_values() {
    let (mut form, calls) = recording_form(user_schema());
    fill(&mut form, &valid_submission());

    let accepted = form.submit().unwrap();

    assert_eq!(accepted, valid_submission());
    assert_eq!(calls.borrow().len(), 1);
    assert_eq!(calls.borrow()[0], valid_submission());
}

#[test]
fn test_age_below_minimum_blocks_submission() {
    let (mut form, calls) = recording_form(user_schema());
    let mut values = valid_submission();
    values.insert("age".to_string(), Value::from("9"));
    fill(&mut form, &values);

    let Err(FormError::Validation(errors)) = form.submit() else {
        panic!("expected validation errors");
    };

    assert!(calls.borrow().is_empty());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get("age").unwrap().kind, ErrorKind::BelowMinimum);
    assert!(matches!(form.status("age"), Some(FieldStatus::Invalid(_))));
    assert_eq!(form.status("email"), Some(&FieldStatus::Valid));
}

#[test]
fn test_empty_submission_reports_every_required_field() {
    let (mut form, calls) = recording_form(user_schema());

    let Err(FormError::Validation(errors)) = form.submit() else {
        panic!("expected validation errors");
    };

    assert!(calls.borrow().is_empty());
    let keys: Vec<_> = errors.errors.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        ["age", "birthday", "birthdays", "email", "major", "name"]
    );
    assert_eq!(errors.get("major").unwrap().message, "Blalal");
    assert!(errors
        .errors
        .values()
        .all(|e| e.kind == ErrorKind::RequiredMissing));
}

#[test]
fn test_invalid_email_and_out_of_range_dates() {
    let (mut form, calls) = recording_form(user_schema());
    let mut values = valid_submission();
    values.insert("email".to_string(), Value::from("a@b"));
    values.insert("birthday".to_string(), Value::from("2024-09-09"));
    values.insert("birthdays".to_string(), Value::from("2024-09-30T18:00:01"));
    fill(&mut form, &values);

    let Err(FormError::Validation(errors)) = form.submit() else {
        panic!("expected validation errors");
    };

    assert!(calls.borrow().is_empty());
    assert_eq!(errors.get("email").unwrap().kind, ErrorKind::InvalidFormat);
    assert_eq!(errors.get("birthday").unwrap().kind, ErrorKind::BelowMinimum);
    assert_eq!(errors.get("birthdays").unwrap().kind, ErrorKind::AboveMaximum);
}

#[test]
fn test_resubmitting_after_a_fix_succeeds() {
    let (mut form, calls) = recording_form(user_schema());
    let mut values = valid_submission();
    values.insert("age".to_string(), Value::from("13"));
    fill(&mut form, &values);
    assert!(form.submit().is_err());

    form.set_value("age", "12").unwrap();
    assert!(form.errors().is_empty());
    form.submit().unwrap();
    assert_eq!(calls.borrow().len(), 1);
}

#[test]
fn test_validate_fn_overrides_failing_style() {
    let schema = FormSchema::builder()
        .field(
            FieldDescriptor::new("age", FieldKind::Number)
                .style("number")
                .options(ValidationOptions::new().min(10))
                .validate_fn(|_, _| Ok(())),
        )
        .build()
        .unwrap();
    let (mut form, calls) = recording_form(schema);
    form.set_value("age", "1").unwrap();

    form.submit().unwrap();
    assert_eq!(calls.borrow().len(), 1);
}

#[test]
fn test_validate_fn_can_reject() {
    let schema = FormSchema::builder()
        .field(
            FieldDescriptor::new("username", FieldKind::Text).validate_fn(|field, value| {
                match value.map(|v| v.as_text().into_owned()) {
                    Some(name) if name == "admin" => Err(FieldError::invalid(format!(
                        "{} is reserved",
                        field.label()
                    ))),
                    _ => Ok(()),
                }
            }),
        )
        .build()
        .unwrap();
    let (mut form, _) = recording_form(schema);

    let status = form.set_value("username", "admin").unwrap();
    let FieldStatus::Invalid(error) = status else {
        panic!("expected invalid status");
    };
    assert_eq!(error.message, "Username is reserved");
}

#[derive(Debug, Deserialize, PartialEq)]
struct User {
    id: String,
    major: String,
    age: String,
    name: String,
    email: String,
    birthday: String,
    birthdays: String,
}

#[test]
fn test_callback_receives_typed_record() {
    let received = std::rc::Rc::new(std::cell::RefCell::new(None));
    let sink = std::rc::Rc::clone(&received);
    let mut form = Form::new(user_schema(), move |user: User| {
        *sink.borrow_mut() = Some(user);
    });
    for (key, value) in valid_submission() {
        form.set_value(&key, value).unwrap();
    }

    form.submit().unwrap();

    let user = received.borrow_mut().take().unwrap();
    assert_eq!(user.name, "Alice");
    assert_eq!(user.birthdays, "2024-09-25T10:00:00");
}

#[derive(Debug, Deserialize)]
struct Counted {
    age: u32,
}

#[test]
fn test_shape_mismatch_is_a_decode_error() {
    let schema = FormSchema::builder()
        .field(FieldDescriptor::new("age", FieldKind::Text))
        .build()
        .unwrap();
    let invoked = std::rc::Rc::new(std::cell::Cell::new(false));
    let flag = std::rc::Rc::clone(&invoked);
    let mut form = Form::new(schema, move |_: Counted| flag.set(true));
    form.set_value("age", "eleven").unwrap();

    assert!(matches!(form.submit(), Err(FormError::Decode(_))));
    assert!(!invoked.get());
}

#[test]
fn test_numeric_values_decode_into_integers() {
    let schema = FormSchema::builder()
        .field(FieldDescriptor::new("age", FieldKind::Number).style("number"))
        .build()
        .unwrap();
    let seen = std::rc::Rc::new(std::cell::Cell::new(0));
    let sink = std::rc::Rc::clone(&seen);
    let mut form = Form::new(schema, move |c: Counted| sink.set(c.age));
    form.set_value("age", 11).unwrap();

    form.submit().unwrap();
    assert_eq!(seen.get(), 11);
}
