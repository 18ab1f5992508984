//! Form schemas: ordered field descriptors plus layout, submit and form
//! attributes.
//!
//! Build one in Rust with [`FormSchema::builder`], or load one from JSON with
//! [`FormSchema::from_json`]. Function-valued settings (explicit validators,
//! custom renders, a custom submit control) are only available from Rust.

mod field;
mod value;

pub use field::{upper_first, CustomRender, FieldDescriptor, FieldKind, Orientation, WidgetProps};
pub use value::{is_blank, Value, ValueMap};

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::error::{FormError, Result};
use crate::layout::{self, LayoutConfig};
use crate::validation::ValidationStyle;

/// Renders a custom submit area in place of the default button.
pub type SubmitRender = Arc<dyn Fn() -> String + Send + Sync>;

/// Options passed to the default submit button.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ButtonProps {
    /// Extra CSS classes, appended to the theme's button classes.
    pub class: Option<String>,
    pub disabled: bool,
}

/// How the submit area is rendered.
#[derive(Clone)]
pub enum SubmitConfig {
    /// The default full-width button; `title` defaults to `Submit`.
    Button {
        title: Option<String>,
        props: ButtonProps,
    },
    /// A caller-provided render replacing the default button.
    Custom(SubmitRender),
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self::Button {
            title: None,
            props: ButtonProps::default(),
        }
    }
}

impl fmt::Debug for SubmitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Button { title, props } => f
                .debug_struct("Button")
                .field("title", title)
                .field("props", props)
                .finish(),
            Self::Custom(_) => f.write_str("Custom(<fn>)"),
        }
    }
}

impl SubmitConfig {
    /// Title of the default button.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Button { title, .. } => Some(title.as_deref().unwrap_or("Submit")),
            Self::Custom(_) => None,
        }
    }
}

/// Attributes of the `<form>` element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormAttrs {
    pub action: String,
    pub method: String,
    pub id: Option<String>,
    pub class: Option<String>,
}

impl Default for FormAttrs {
    fn default() -> Self {
        Self {
            action: String::new(),
            method: "post".to_string(),
            id: None,
            class: None,
        }
    }
}

/// A validated form schema.
///
/// Keys are unique, choice fields carry options and spans fit the layout.
/// Descriptor order is render order.
#[derive(Debug, Clone)]
pub struct FormSchema {
    fields: Vec<FieldDescriptor>,
    layout: LayoutConfig,
    submit: SubmitConfig,
    attrs: FormAttrs,
    strict_styles: bool,
}

impl FormSchema {
    /// Starts building a schema.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Parses and validates a JSON schema document.
    ///
    /// ```
    /// use genform::FormSchema;
    ///
    /// let schema = FormSchema::from_json(r#"{
    ///     "fields": [
    ///         {"key": "name", "type": "text"},
    ///         {"key": "age", "type": "number", "validation": {"style": "number", "options": {"min": 10}}}
    ///     ],
    ///     "layout": {"xl": {"col": 2, "gap": 2}}
    /// }"#).unwrap();
    /// assert_eq!(schema.fields().len(), 2);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: SchemaDocument = serde_json::from_str(json).map_err(FormError::Schema)?;

        let mut builder = Self::builder().fields(doc.fields).form_attrs(doc.form);
        if let Some(layout) = doc.layout {
            builder = builder.layout(layout);
        }
        if let Some(button) = doc.submit_button {
            builder = builder.submit(SubmitConfig::Button {
                title: button.title,
                props: button.props,
            });
        }
        if doc.strict_styles {
            builder = builder.strict_styles();
        }
        builder.build()
    }

    /// The descriptors, in render order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Looks up a descriptor by key.
    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn submit(&self) -> &SubmitConfig {
        &self.submit
    }

    pub fn attrs(&self) -> &FormAttrs {
        &self.attrs
    }

    /// Whether unknown validation styles were rejected at build time.
    pub fn strict_styles(&self) -> bool {
        self.strict_styles
    }
}

/// Builder for [`FormSchema`].
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<FieldDescriptor>,
    layout: Option<LayoutConfig>,
    submit: SubmitConfig,
    attrs: FormAttrs,
    strict_styles: bool,
}

impl SchemaBuilder {
    /// Appends a field.
    #[must_use]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends several fields.
    #[must_use]
    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Sets the layout. Without one, two columns at `xl` with a 20px gap.
    #[must_use]
    pub fn layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Sets the title of the default submit button.
    #[must_use]
    pub fn submit_button(mut self, title: impl Into<String>) -> Self {
        let props = match self.submit {
            SubmitConfig::Button { props, .. } => props,
            SubmitConfig::Custom(_) => ButtonProps::default(),
        };
        self.submit = SubmitConfig::Button {
            title: Some(title.into()),
            props,
        };
        self
    }

    /// Replaces the submit configuration.
    #[must_use]
    pub fn submit(mut self, submit: SubmitConfig) -> Self {
        self.submit = submit;
        self
    }

    /// Renders the submit area with `f` instead of the default button.
    #[must_use]
    pub fn submit_render<F>(mut self, f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.submit = SubmitConfig::Custom(Arc::new(f));
        self
    }

    /// Sets the form `action` attribute.
    #[must_use]
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.attrs.action = action.into();
        self
    }

    /// Sets the form `method` attribute.
    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.attrs.method = method.into();
        self
    }

    /// Replaces all form attributes.
    #[must_use]
    pub fn form_attrs(mut self, attrs: FormAttrs) -> Self {
        self.attrs = attrs;
        self
    }

    /// Rejects validation styles that have no built-in rule instead of
    /// falling back to `text`.
    #[must_use]
    pub fn strict_styles(mut self) -> Self {
        self.strict_styles = true;
        self
    }

    /// Checks the descriptors and builds the schema.
    ///
    /// # Errors
    ///
    /// - [`FormError::DuplicateKey`] when two fields share a key.
    /// - [`FormError::MissingChoiceData`] for choice fields without options,
    ///   unless the field has a custom render.
    /// - [`FormError::SpanOverflow`] under [`layout::OverflowPolicy::Reject`].
    /// - [`FormError::UnknownValidationStyle`] in strict-style mode.
    pub fn build(self) -> Result<FormSchema> {
        let layout = self.layout.unwrap_or_default();
        let mut seen = BTreeSet::new();

        for field in &self.fields {
            if !seen.insert(field.key.as_str()) {
                return Err(FormError::DuplicateKey(field.key.clone()));
            }
            if field.custom_render.is_none() {
                field.ensure_choice_data()?;
            }
            layout::resolve_placement(Some(&layout), &field.key, field.column_span)?;

            if self.strict_styles && field.validation.validate_fn.is_none() {
                if let Some(ValidationStyle::Unrecognized(style)) = &field.validation.style {
                    return Err(FormError::UnknownValidationStyle {
                        key: field.key.clone(),
                        style: style.clone(),
                    });
                }
            }
        }

        debug!(fields = self.fields.len(), "built form schema");

        Ok(FormSchema {
            fields: self.fields,
            layout,
            submit: self.submit,
            attrs: self.attrs,
            strict_styles: self.strict_styles,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SchemaDocument {
    fields: Vec<FieldDescriptor>,
    #[serde(default)]
    layout: Option<LayoutConfig>,
    #[serde(default)]
    submit_button: Option<SubmitButtonDocument>,
    #[serde(default)]
    form: FormAttrs,
    #[serde(default)]
    strict_styles: bool,
}

#[derive(Deserialize)]
struct SubmitButtonDocument {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    props: ButtonProps,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutItem, OverflowPolicy};

    #[test]
    fn test_builder_keeps_field_order() {
        let schema = FormSchema::builder()
            .field(FieldDescriptor::new("b", FieldKind::Text))
            .field(FieldDescriptor::new("a", FieldKind::Text))
            .build()
            .unwrap();
        let keys: Vec<_> = schema.fields().iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, ["b", "a"]);
        assert!(schema.field("a").is_some());
        assert!(schema.field("c").is_none());
    }

    #[test]
    fn test_default_layout_and_submit() {
        let schema = FormSchema::builder().build().unwrap();
        assert_eq!(schema.layout(), &LayoutConfig::default());
        assert_eq!(schema.submit().title(), Some("Submit"));
        assert_eq!(schema.attrs().method, "post");
        assert_eq!(schema.attrs().action, "");
    }

    #[test]
    fn test_duplicate_key_is_rejected() {
        let err = FormSchema::builder()
            .field(FieldDescriptor::new("name", FieldKind::Text))
            .field(FieldDescriptor::new("name", FieldKind::Number))
            .build()
            .unwrap_err();
        assert!(matches!(err, FormError::DuplicateKey(key) if key == "name"));
    }

    #[test]
    fn test_missing_choice_data_is_rejected() {
        let err = FormSchema::builder()
            .field(FieldDescriptor::new("gender", FieldKind::Boolean))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("the data prop is required"));
    }

    #[test]
    fn test_custom_render_skips_choice_data_check() {
        let schema = FormSchema::builder()
            .field(
                FieldDescriptor::new("note", FieldKind::Select)
                    .render(|f| format!("<p>{}</p>", f.key)),
            )
            .build()
            .unwrap();
        assert!(schema.field("note").unwrap().choice_data.is_empty());
    }

    #[test]
    fn test_span_overflow_follows_policy() {
        let wide = || FieldDescriptor::new("bio", FieldKind::TextArea).span(4);

        assert!(FormSchema::builder().field(wide()).build().is_ok());

        let err = FormSchema::builder()
            .layout(
                LayoutConfig::empty()
                    .xl(LayoutItem::columns(2))
                    .overflow(OverflowPolicy::Reject),
            )
            .field(wide())
            .build()
            .unwrap_err();
        assert!(matches!(err, FormError::SpanOverflow { span: 4, columns: 2, .. }));
    }

    #[test]
    fn test_strict_styles() {
        let field = || FieldDescriptor::new("zip", FieldKind::Text).style("postcode");

        assert!(FormSchema::builder().field(field()).build().is_ok());

        let err = FormSchema::builder()
            .strict_styles()
            .field(field())
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            FormError::UnknownValidationStyle { ref style, .. } if style == "postcode"
        ));

        let overridden = field().validate_fn(|_, _| Ok(()));
        assert!(FormSchema::builder()
            .strict_styles()
            .field(overridden)
            .build()
            .is_ok());
    }

    #[test]
    fn test_submit_button_title_and_custom() {
        let schema = FormSchema::builder().submit_button("Save").build().unwrap();
        assert_eq!(schema.submit().title(), Some("Save"));

        let schema = FormSchema::builder()
            .submit_render(|| "<button>Go</button>".to_string())
            .build()
            .unwrap();
        assert!(matches!(schema.submit(), SubmitConfig::Custom(_)));
        assert_eq!(schema.submit().title(), None);
    }

    #[test]
    fn test_from_json() {
        let schema = FormSchema::from_json(
            r#"{
                "fields": [
                    {"key": "id", "type": "show", "value": "1"},
                    {"key": "role", "type": "select", "data": ["user", "admin"]}
                ],
                "layout": {"xl": {"col": 2, "gap": 2}, "md": {"col": 1}},
                "submitButton": {"title": "Save", "props": {"class": "shadow"}},
                "form": {"action": "/users", "method": "post"}
            }"#,
        )
        .unwrap();
        assert_eq!(schema.fields().len(), 2);
        assert_eq!(schema.layout().governing_columns().map(|(_, c)| c), Some(2));
        assert_eq!(schema.submit().title(), Some("Save"));
        assert_eq!(schema.attrs().action, "/users");
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            FormSchema::from_json("{not json").unwrap_err(),
            FormError::Schema(_)
        ));
        assert!(matches!(
            FormSchema::from_json(r#"{"fields": [{"key": "c", "type": "checkbox"}]}"#).unwrap_err(),
            FormError::MissingChoiceData { .. }
        ));
    }
}
