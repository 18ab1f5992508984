//! Field descriptors.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use super::value::Value;
use crate::error::{FieldError, FormError, Result};
use crate::validation::{FieldValidation, ValidationOptions, ValidationStyle};

/// Full render override: receives the descriptor, returns the field's HTML.
pub type CustomRender = Arc<dyn Fn(&FieldDescriptor) -> String + Send + Sync>;

/// The declared type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    /// Read-only text.
    Show,
    Text,
    Number,
    /// Single choice rendered as a radio group.
    Boolean,
    Select,
    /// Multiple choice rendered as a checkbox group.
    Checkbox,
    Password,
    TextArea,
    Date,
    Datetime,
}

impl FieldKind {
    /// Returns the type name as written in schemas.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Show => "show",
            Self::Text => "text",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::Password => "password",
            Self::TextArea => "text-area",
            Self::Date => "date",
            Self::Datetime => "datetime",
        }
    }

    /// Whether the kind renders from `choice_data`.
    #[must_use]
    pub const fn requires_choice_data(self) -> bool {
        matches!(self, Self::Select | Self::Checkbox | Self::Boolean)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Layout of the sub-controls of a checkbox or radio group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Recognized passthrough options for the resolved widget.
///
/// Options a widget does not understand are ignored by it: `rows` only
/// reaches text areas, `step` only number inputs, the blank-option settings
/// only selects.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetProps {
    pub placeholder: Option<String>,
    pub disabled: bool,
    pub help_text: Option<String>,
    /// Extra CSS classes appended to the control.
    pub class: Option<String>,
    pub rows: Option<usize>,
    pub step: Option<f64>,
    /// Label of the empty first option of a select.
    pub blank_label: Option<String>,
    /// Omit the empty first option of a select.
    pub hide_blank: bool,
}

/// Declarative specification of one form field.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Unique key; also the key in the submitted value bag.
    pub key: String,
    /// Display label. Defaults to the key with its first letter upper-cased.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default, alias = "value")]
    pub initial_value: Option<Value>,
    #[serde(default, alias = "validate")]
    pub validation: FieldValidation,
    #[serde(default, alias = "colspan")]
    pub column_span: Option<u16>,
    /// Options of select, checkbox and boolean fields, in display order.
    #[serde(default, alias = "data")]
    pub choice_data: Vec<String>,
    #[serde(default, alias = "styleShow")]
    pub orientation: Orientation,
    #[serde(skip)]
    pub custom_render: Option<CustomRender>,
    #[serde(default)]
    pub props: WidgetProps,
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("kind", &self.kind)
            .field("initial_value", &self.initial_value)
            .field("validation", &self.validation)
            .field("column_span", &self.column_span)
            .field("choice_data", &self.choice_data)
            .field("orientation", &self.orientation)
            .field("props", &self.props)
            .finish_non_exhaustive()
    }
}

impl FieldDescriptor {
    /// Creates a new field descriptor.
    pub fn new(key: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            title: None,
            kind,
            initial_value: None,
            validation: FieldValidation::default(),
            column_span: None,
            choice_data: Vec::new(),
            orientation: Orientation::default(),
            custom_render: None,
            props: WidgetProps::default(),
        }
    }

    /// Sets the display label.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the initial value.
    #[must_use]
    pub fn initial(mut self, value: impl Into<Value>) -> Self {
        self.initial_value = Some(value.into());
        self
    }

    /// Selects a built-in validation rule.
    #[must_use]
    pub fn style(mut self, style: impl Into<ValidationStyle>) -> Self {
        self.validation.style = Some(style.into());
        self
    }

    /// Sets the validation options.
    #[must_use]
    pub fn options(mut self, options: ValidationOptions) -> Self {
        self.validation.options = options;
        self
    }

    /// Installs an explicit validator that overrides any style rule.
    #[must_use]
    pub fn validate_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Self, Option<&Value>) -> std::result::Result<(), FieldError> + Send + Sync + 'static,
    {
        self.validation.validate_fn = Some(Arc::new(f));
        self
    }

    /// Sets the number of grid columns the field spans.
    #[must_use]
    pub fn span(mut self, columns: u16) -> Self {
        self.column_span = Some(columns);
        self
    }

    /// Sets the options of a choice field.
    #[must_use]
    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choice_data = choices.into_iter().map(Into::into).collect();
        self
    }

    /// Stacks checkbox/radio options vertically.
    #[must_use]
    pub fn vertical(mut self) -> Self {
        self.orientation = Orientation::Vertical;
        self
    }

    /// Replaces dispatch with a custom renderer.
    #[must_use]
    pub fn render<F>(mut self, f: F) -> Self
    where
        F: Fn(&Self) -> String + Send + Sync + 'static,
    {
        self.custom_render = Some(Arc::new(f));
        self
    }

    /// Sets the widget passthrough options.
    #[must_use]
    pub fn props(mut self, props: WidgetProps) -> Self {
        self.props = props;
        self
    }

    /// Sets placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.props.placeholder = Some(text.into());
        self
    }

    /// Sets help text shown under the control.
    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.props.help_text = Some(text.into());
        self
    }

    /// Disables the control.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.props.disabled = true;
        self
    }

    /// The resolved display label.
    #[must_use]
    pub fn label(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| upper_first(&self.key))
    }

    /// Fails when a choice kind has no options.
    pub fn ensure_choice_data(&self) -> Result<()> {
        if self.kind.requires_choice_data() && self.choice_data.is_empty() {
            return Err(FormError::MissingChoiceData {
                key: self.key.clone(),
                kind: self.kind.as_str(),
            });
        }
        Ok(())
    }
}

/// Upper-cases the first character, leaving the rest untouched.
#[must_use]
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
