//! Schema and value file handling behind each subcommand.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::Context;
use genform::dispatch::resolve_validator;
use genform::layout::placement_for;
use genform::{Form, FormError, FormSchema, Theme, ValidationErrors, ValueMap};

/// Result of the `submit` command.
#[derive(Debug)]
pub enum Outcome {
    /// Pretty-printed JSON of the accepted value bag.
    Accepted(String),
    Rejected(ValidationErrors),
}

/// Reads and builds a schema file.
pub fn load_schema(path: &Path) -> anyhow::Result<FormSchema> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read schema {}", path.display()))?;
    FormSchema::from_json(&json).with_context(|| format!("invalid schema {}", path.display()))
}

/// Reads a values file: a JSON object keyed by field.
pub fn load_values(path: &Path) -> anyhow::Result<ValueMap> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read values {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("invalid values {}", path.display()))
}

/// One line per field: key, kind, validator source and column span.
pub fn check(schema: &FormSchema) -> String {
    let mut out = String::new();
    for field in schema.fields() {
        let source = resolve_validator(field).source().to_string();
        let span = placement_for(Some(schema.layout()), field.column_span).span;
        let _ = writeln!(
            out,
            "{:<16} {:<10} {:<16} span {span}",
            field.key,
            field.kind.as_str(),
            source
        );
    }
    out
}

/// Renders the form with `values`, optionally validating them first.
pub fn render(schema: FormSchema, values: ValueMap, validate: bool) -> anyhow::Result<String> {
    let mut form: Form = Form::new(schema, |_| {});
    form.prefill(values)?;
    if validate {
        let _ = form.validate_all();
    }
    Ok(form.render(&Theme::default())?)
}

/// Runs the submission pass over `values`.
pub fn submit(schema: FormSchema, values: ValueMap) -> anyhow::Result<Outcome> {
    let mut form: Form = Form::new(schema, |_| {});
    form.set_values(values)?;
    match form.submit() {
        Ok(accepted) => Ok(Outcome::Accepted(serde_json::to_string_pretty(&accepted)?)),
        Err(FormError::Validation(errors)) => Ok(Outcome::Rejected(errors)),
        Err(e) => Err(e.into()),
    }
}
