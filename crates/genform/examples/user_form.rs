//! Builds the user profile form, renders it, then submits it twice: once
//! with an out-of-range age and once with valid values.
//!
//! Run with: `cargo run -p genform --example user_form`

use genform::fields::{boolean_field, checkbox_field, show_field};
use genform::layout::{LayoutConfig, LayoutItem};
use genform::schema::{FieldDescriptor, FieldKind, FormSchema};
use genform::validation::ValidationOptions;
use genform::{Form, FormError, Theme};
use serde::Deserialize;

#[derive(Deserialize)]
struct Profile {
    name: String,
    age: String,
    email: String,
    birthday: String,
    #[serde(default)]
    hobbies: Vec<String>,
}

fn main() -> Result<(), FormError> {
    let schema = FormSchema::builder()
        .layout(
            LayoutConfig::empty()
                .xl(LayoutItem::new(2, 2))
                .lg(LayoutItem::columns(2))
                .md(LayoutItem::columns(1)),
        )
        .field(show_field("id", "1"))
        .field(FieldDescriptor::new("name", FieldKind::Text).placeholder("Full name"))
        .field(
            FieldDescriptor::new("age", FieldKind::Number)
                .style("number")
                .options(ValidationOptions::new().min(10).max(12)),
        )
        .field(FieldDescriptor::new("email", FieldKind::Text).style("email"))
        .field(
            FieldDescriptor::new("birthday", FieldKind::Date)
                .style("date")
                .options(
                    ValidationOptions::new()
                        .min("24/09/2024")
                        .max("30/09/2024")
                        .date_format("DD/MM/YYYY"),
                ),
        )
        .field(boolean_field("gender", &["male", "female"], false))
        .field(checkbox_field("hobbies", &["reading", "chess", "hiking"], true).span(2))
        .action("/profile")
        .build()?;

    let mut form = Form::new(schema, |profile: Profile| {
        println!(
            "accepted {} <{}>, age {}, born {}, hobbies: {}",
            profile.name,
            profile.email,
            profile.age,
            profile.birthday,
            profile.hobbies.join(", ")
        );
    });

    form.set_value("name", "Alice")?;
    form.set_value("age", "9")?;
    form.set_value("email", "a@b.com")?;
    form.set_value("birthday", "25/09/2024")?;
    form.set_value("gender", "female")?;

    match form.submit() {
        Err(FormError::Validation(errors)) => {
            for (field, message) in errors.all_errors() {
                println!("{field}: {message}");
            }
        }
        other => println!("unexpected: {other:?}"),
    }

    form.set_value("age", "11")?;
    form.submit()?;

    println!("{}", form.render(&Theme::default())?);
    Ok(())
}
