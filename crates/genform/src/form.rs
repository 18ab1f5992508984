//! Form state and submission.

use std::collections::BTreeMap;
use std::fmt;

use ironhtml::html;
use ironhtml::typed::Element;
use ironhtml_elements::{Button, Div};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::dispatch::{self, CommonProps, ResolvedValidator};
use crate::error::{FieldError, FormError, Result, ValidationErrors};
use crate::layout;
use crate::schema::{FieldDescriptor, FormSchema, SubmitConfig, Value, ValueMap};
use crate::theme::Theme;
use crate::validation::Validator;

/// A field paired with its resolved validator.
#[derive(Debug, Clone)]
pub struct FieldValidator {
    pub field: FieldDescriptor,
    pub validator: ResolvedValidator,
}

impl FieldValidator {
    /// Validates a candidate value for the field.
    pub fn check(&self, value: Option<&Value>) -> std::result::Result<(), FieldError> {
        self.validator.validate(&self.field, value)
    }
}

/// Validators by field key.
pub type ValidatorMap = BTreeMap<String, FieldValidator>;

/// Initial values: each field's `initial_value`; fields without one are absent.
pub fn build_initial_values(fields: &[FieldDescriptor]) -> ValueMap {
    fields
        .iter()
        .filter_map(|f| f.initial_value.clone().map(|v| (f.key.clone(), v)))
        .collect()
}

/// Resolves the validator of every field, including read-only ones.
pub fn build_validator_map(fields: &[FieldDescriptor]) -> ValidatorMap {
    fields
        .iter()
        .map(|f| {
            (
                f.key.clone(),
                FieldValidator {
                    field: f.clone(),
                    validator: dispatch::resolve_validator(f),
                },
            )
        })
        .collect()
}

/// Runs every validator against `values`.
///
/// Returns the accepted values, or every field error at once.
pub fn submit(
    validators: &ValidatorMap,
    values: &ValueMap,
) -> std::result::Result<ValueMap, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    for (key, validator) in validators {
        if let Err(e) = validator.check(values.get(key)) {
            errors.add(key, e);
        }
    }

    if errors.is_empty() {
        Ok(values.clone())
    } else {
        Err(errors)
    }
}

/// Per-field interaction state.
///
/// Moves `Pristine → Touched → {Valid, Invalid}`. A value change on a
/// pristine field touches it first, then settles on the check result in the
/// same call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldStatus {
    /// Not interacted with yet.
    #[default]
    Pristine,
    /// Focused or visited without a validated change.
    Touched,
    Valid,
    Invalid(FieldError),
}

impl FieldStatus {
    /// Whether the field has left the pristine state.
    pub fn is_touched(&self) -> bool {
        !matches!(self, Self::Pristine)
    }

    fn touch(&mut self) {
        if *self == Self::Pristine {
            *self = Self::Touched;
        }
    }

    fn settle(&mut self, result: std::result::Result<(), FieldError>) {
        *self = match result {
            Ok(()) => Self::Valid,
            Err(e) => Self::Invalid(e),
        };
    }
}

type SubmitCallback<R> = Box<dyn FnMut(R)>;

/// A live form: schema, current values, statuses and the submit callback.
///
/// `R` is the record the accepted values are shaped into before they reach
/// the callback; it defaults to the raw [`ValueMap`].
pub struct Form<R = ValueMap> {
    schema: FormSchema,
    values: ValueMap,
    validators: ValidatorMap,
    errors: ValidationErrors,
    status: BTreeMap<String, FieldStatus>,
    on_submit: SubmitCallback<R>,
}

impl<R> fmt::Debug for Form<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("schema", &self.schema)
            .field("values", &self.values)
            .field("errors", &self.errors)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl<R: DeserializeOwned> Form<R> {
    /// Creates a form with every field pristine and initial values set.
    pub fn new<F>(schema: FormSchema, on_submit: F) -> Self
    where
        F: FnMut(R) + 'static,
    {
        let values = build_initial_values(schema.fields());
        let validators = build_validator_map(schema.fields());
        let status = schema
            .fields()
            .iter()
            .map(|f| (f.key.clone(), FieldStatus::Pristine))
            .collect();

        Self {
            schema,
            values,
            validators,
            errors: ValidationErrors::new(),
            status,
            on_submit: Box::new(on_submit),
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// The current value bag.
    pub fn values(&self) -> &ValueMap {
        &self.values
    }

    /// The current per-field errors.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// The status of a field, `None` for unknown keys.
    pub fn status(&self, key: &str) -> Option<&FieldStatus> {
        self.status.get(key)
    }

    /// The resolved validators by key.
    pub fn validators(&self) -> &ValidatorMap {
        &self.validators
    }

    /// Sets a field's value and re-validates that field.
    ///
    /// # Errors
    ///
    /// [`FormError::UnknownField`] when the schema has no such key.
    pub fn set_value(&mut self, key: &str, value: impl Into<Value>) -> Result<&FieldStatus> {
        self.update(key, Some(value.into()))
    }

    /// Unsets a field's value and re-validates that field.
    pub fn clear_value(&mut self, key: &str) -> Result<&FieldStatus> {
        self.update(key, None)
    }

    /// Sets several values, re-validating each field set.
    ///
    /// # Errors
    ///
    /// [`FormError::UnknownField`] when any key is not in the schema; the
    /// form is left unchanged.
    pub fn set_values(&mut self, values: ValueMap) -> Result<()> {
        self.ensure_known(&values)?;
        for (key, value) in values {
            self.update(&key, Some(value))?;
        }
        Ok(())
    }

    /// Replaces current values without validating them; statuses and errors
    /// are left untouched.
    pub fn prefill(&mut self, values: ValueMap) -> Result<()> {
        self.ensure_known(&values)?;
        self.values.extend(values);
        Ok(())
    }

    fn ensure_known(&self, values: &ValueMap) -> Result<()> {
        match values.keys().find(|k| !self.validators.contains_key(*k)) {
            Some(key) => Err(FormError::UnknownField(key.clone())),
            None => Ok(()),
        }
    }

    /// Marks a pristine field as touched.
    pub fn touch(&mut self, key: &str) -> Result<()> {
        self.status
            .get_mut(key)
            .ok_or_else(|| FormError::UnknownField(key.to_string()))?
            .touch();
        Ok(())
    }

    fn update(&mut self, key: &str, value: Option<Value>) -> Result<&FieldStatus> {
        let validator = self
            .validators
            .get(key)
            .ok_or_else(|| FormError::UnknownField(key.to_string()))?;

        let result = validator.check(value.as_ref());
        match &result {
            Ok(()) => {
                self.errors.remove(key);
            }
            Err(e) => self.errors.add(key, e.clone()),
        }

        match value {
            Some(v) => self.values.insert(key.to_string(), v),
            None => self.values.remove(key),
        };

        let status = self.status.entry(key.to_string()).or_default();
        status.settle(result);
        Ok(status)
    }

    /// Validates every field, updating statuses and errors.
    pub fn validate_all(&mut self) -> std::result::Result<(), ValidationErrors> {
        let result = submit(&self.validators, &self.values).map(|_| ());
        self.errors = result.clone().err().unwrap_or_default();

        for (key, status) in &mut self.status {
            status.settle(match self.errors.get(key) {
                Some(e) => Err(e.clone()),
                None => Ok(()),
            });
        }
        result
    }

    /// Validates every field and, when all pass, hands the values to the
    /// callback exactly once.
    ///
    /// # Errors
    ///
    /// - [`FormError::Validation`] with every field error; the callback is
    ///   not invoked.
    /// - [`FormError::Decode`] when the values do not fit `R`; the callback
    ///   is not invoked.
    pub fn submit(&mut self) -> Result<ValueMap> {
        if let Err(errors) = self.validate_all() {
            debug!(errors = errors.len(), "submission blocked");
            return Err(FormError::Validation(errors));
        }

        let json = serde_json::to_value(&self.values).map_err(FormError::Decode)?;
        let record: R = serde_json::from_value(json).map_err(FormError::Decode)?;

        debug!(fields = self.values.len(), "submitting form");
        (self.on_submit)(record);
        Ok(self.values.clone())
    }

    /// Renders the form: a grid container with every field, then the submit
    /// area.
    ///
    /// Identical schema and state always produce identical output.
    pub fn render(&self, theme: &Theme) -> Result<String> {
        let layout = self.schema.layout();

        let mut fields_html = String::new();
        for field in self.schema.fields() {
            let props = CommonProps::for_field(
                field,
                Some(layout),
                self.values.get(&field.key),
                self.errors.get(&field.key),
            );
            fields_html.push_str(&dispatch::render_widget(field, props)?.to_html(theme));
        }

        let submit_html = match self.schema.submit() {
            SubmitConfig::Custom(render) => render(),
            SubmitConfig::Button { title, props } => {
                let class = match &props.class {
                    Some(extra) => format!("{} {extra}", theme.button_class),
                    None => theme.button_class.clone(),
                };
                let title = title.as_deref().unwrap_or("Submit");
                Element::<Button>::new()
                    .attr("type", "submit")
                    .class(&class)
                    .when(props.disabled, |b| b.attr("disabled", "disabled"))
                    .text(title)
                    .render()
            }
        };

        let attrs = self.schema.attrs();
        let action = attrs.action.as_str();
        let method = attrs.method.as_str();
        let container = layout::container_class_for(Some(layout)).class_name();

        let form = html! {
            form.action(#action).method(#method)
        };

        Ok(form
            .when(attrs.id.is_some(), |f| {
                f.attr("id", attrs.id.as_deref().unwrap_or(""))
            })
            .when(attrs.class.is_some(), |f| {
                f.class(attrs.class.as_deref().unwrap_or(""))
            })
            .child::<Div, _>(|d| d.class(&container).raw(&fields_html))
            .child::<Div, _>(|d| d.class(&theme.submit_wrapper_class).raw(&submit_html))
            .render())
    }
}
