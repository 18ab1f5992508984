//! Bootstrap 5 form widgets.

use super::{class_list, element_id, html_escape, Widget, WidgetAttrs};
use crate::schema::Value;
use crate::validation::date_format::{DEFAULT_DATETIME_FORMAT, DEFAULT_DATE_FORMAT};

/// Bootstrap 5 text input widget.
#[derive(Debug, Clone)]
pub struct BootstrapTextInput {
    /// The HTML input type (text, email, password, etc.).
    pub input_type: String,
    /// Placeholder text.
    pub placeholder: Option<String>,
    /// Increment for number and datetime inputs.
    pub step: Option<f64>,
    /// Renders as read-only plain text.
    pub read_only: bool,
    /// Token format for date inputs that the browser picker cannot express.
    pub date_format: Option<String>,
}

impl Default for BootstrapTextInput {
    fn default() -> Self {
        Self {
            input_type: "text".to_string(),
            placeholder: None,
            step: None,
            read_only: false,
            date_format: None,
        }
    }
}

impl BootstrapTextInput {
    /// Creates a new text input.
    pub fn new() -> Self {
        Self::default()
    }

    fn typed(input_type: &str) -> Self {
        Self {
            input_type: input_type.to_string(),
            ..Default::default()
        }
    }

    /// Creates a password input.
    pub fn password() -> Self {
        Self::typed("password")
    }

    /// Creates an email input.
    pub fn email() -> Self {
        Self::typed("email")
    }

    /// Creates a number input.
    pub fn number() -> Self {
        Self::typed("number")
    }

    /// Creates a read-only plain text input.
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Default::default()
        }
    }

    /// Creates a date input for values in the `tokens` format.
    ///
    /// ISO dates use the native picker; any other format falls back to a
    /// text input carrying the format as `data-date-format`.
    pub fn date(tokens: &str) -> Self {
        if tokens == DEFAULT_DATE_FORMAT {
            Self::typed("date")
        } else {
            Self::formatted(tokens)
        }
    }

    /// Creates a date-and-time input for values in the `tokens` format.
    pub fn datetime(tokens: &str) -> Self {
        if tokens == DEFAULT_DATETIME_FORMAT {
            Self::typed("datetime-local").step(1.0)
        } else {
            Self::formatted(tokens)
        }
    }

    fn formatted(tokens: &str) -> Self {
        Self {
            placeholder: Some(tokens.to_string()),
            date_format: Some(tokens.to_string()),
            ..Default::default()
        }
    }

    /// Sets the placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    /// Sets the step increment.
    #[must_use]
    pub fn step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }
}

impl Widget for BootstrapTextInput {
    fn render(&self, name: &str, value: Option<&Value>, attrs: &WidgetAttrs) -> String {
        let value_attr = value
            .map(|v| format!(r#" value="{}""#, html_escape(&v.as_text())))
            .unwrap_or_default();

        let placeholder_attr = self
            .placeholder
            .as_ref()
            .map(|p| format!(r#" placeholder="{}""#, html_escape(p)))
            .unwrap_or_default();

        let step_attr = self
            .step
            .map(|s| format!(r#" step="{s}""#))
            .unwrap_or_default();

        let format_attr = self
            .date_format
            .as_ref()
            .map(|f| format!(r#" data-date-format="{}""#, html_escape(f)))
            .unwrap_or_default();

        let (base, readonly_attr) = if self.read_only {
            ("form-control-plaintext", " readonly")
        } else {
            ("form-control", "")
        };
        let class = class_list(base, attrs);
        let id = element_id(name, attrs);
        let extra_attrs = attrs.extra_html();

        format!(
            r#"<input type="{}" class="{class}" id="{id}" name="{name}"{value_attr}{placeholder_attr}{step_attr}{format_attr}{readonly_attr}{extra_attrs}>"#,
            self.input_type
        )
    }

    fn input_type(&self) -> &str {
        &self.input_type
    }
}

/// Bootstrap 5 textarea widget.
#[derive(Debug, Clone)]
pub struct BootstrapTextarea {
    /// Number of rows.
    pub rows: usize,
    /// Placeholder text.
    pub placeholder: Option<String>,
}

impl Default for BootstrapTextarea {
    fn default() -> Self {
        Self {
            rows: 4,
            placeholder: None,
        }
    }
}

impl BootstrapTextarea {
    /// Creates a new textarea with the specified rows.
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            placeholder: None,
        }
    }

    /// Sets the placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }
}

impl Widget for BootstrapTextarea {
    fn render(&self, name: &str, value: Option<&Value>, attrs: &WidgetAttrs) -> String {
        let content = value
            .map(|v| html_escape(&v.as_text()))
            .unwrap_or_default();

        let placeholder_attr = self
            .placeholder
            .as_ref()
            .map(|p| format!(r#" placeholder="{}""#, html_escape(p)))
            .unwrap_or_default();

        let class = class_list("form-control", attrs);
        let id = element_id(name, attrs);
        let extra_attrs = attrs.extra_html();

        format!(
            r#"<textarea class="{class}" id="{id}" name="{name}" rows="{}"{placeholder_attr}{extra_attrs}>{content}</textarea>"#,
            self.rows
        )
    }

    fn input_type(&self) -> &str {
        "textarea"
    }
}

/// Bootstrap 5 select widget.
#[derive(Debug, Clone)]
pub struct BootstrapSelect {
    /// Available choices (value, label).
    pub choices: Vec<(String, String)>,
    /// Whether to include an empty option.
    pub include_blank: bool,
    /// Label for blank option.
    pub blank_label: String,
}

impl Default for BootstrapSelect {
    fn default() -> Self {
        Self {
            choices: Vec::new(),
            include_blank: true,
            blank_label: "---------".to_string(),
        }
    }
}

impl BootstrapSelect {
    /// Creates a new select with the given choices.
    pub fn new(choices: Vec<(impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            choices: choices
                .into_iter()
                .map(|(v, l)| (v.into(), l.into()))
                .collect(),
            ..Default::default()
        }
    }

    /// Disables the blank option.
    #[must_use]
    pub fn no_blank(mut self) -> Self {
        self.include_blank = false;
        self
    }

    /// Sets the blank label.
    #[must_use]
    pub fn blank_label(mut self, label: impl Into<String>) -> Self {
        self.blank_label = label.into();
        self
    }
}

impl Widget for BootstrapSelect {
    fn render(&self, name: &str, value: Option<&Value>, attrs: &WidgetAttrs) -> String {
        let class = class_list("form-select", attrs);
        let id = element_id(name, attrs);
        let extra_attrs = attrs.extra_html();

        let mut options = String::new();

        if self.include_blank {
            options.push_str(&format!(
                r#"<option value="">{}</option>"#,
                html_escape(&self.blank_label)
            ));
        }

        for (opt_value, label) in &self.choices {
            let selected = value.is_some_and(|v| v.contains(opt_value));
            let selected_attr = if selected { " selected" } else { "" };
            options.push_str(&format!(
                r#"<option value="{}"{selected_attr}>{}</option>"#,
                html_escape(opt_value),
                html_escape(label)
            ));
        }

        format!(r#"<select class="{class}" id="{id}" name="{name}"{extra_attrs}>{options}</select>"#)
    }

    fn input_type(&self) -> &str {
        "select"
    }
}

/// Renders one `form-check` option: a checkbox or radio with its label.
fn check_option(
    input_type: &str,
    wrapper_class: &str,
    name: &str,
    index: usize,
    option: (&str, &str),
    checked: bool,
    attrs: &WidgetAttrs,
) -> String {
    let (opt_value, label) = option;
    let id = format!("{}_{index}", element_id(name, attrs));
    let checked_attr = if checked { " checked" } else { "" };
    let class = class_list("form-check-input", attrs);
    let extra_attrs = attrs.extra_html();

    format!(
        r#"<div class="{wrapper_class}">
  <input class="{class}" type="{input_type}" id="{id}" name="{name}" value="{}"{checked_attr}{extra_attrs}>
  <label class="form-check-label" for="{id}">{}</label>
</div>
"#,
        html_escape(opt_value),
        html_escape(label)
    )
}

/// Bootstrap 5 checkbox group: one checkbox per choice, any number checked.
#[derive(Debug, Clone, Default)]
pub struct BootstrapCheckboxGroup {
    /// Available choices (value, label).
    pub choices: Vec<(String, String)>,
    /// Whether to display inline.
    pub inline: bool,
}

impl BootstrapCheckboxGroup {
    /// Creates a new checkbox group with the given choices.
    pub fn new(choices: Vec<(impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            choices: choices
                .into_iter()
                .map(|(v, l)| (v.into(), l.into()))
                .collect(),
            inline: false,
        }
    }

    /// Makes the checkboxes display inline.
    #[must_use]
    pub fn inline(mut self) -> Self {
        self.inline = true;
        self
    }
}

impl Widget for BootstrapCheckboxGroup {
    fn render(&self, name: &str, value: Option<&Value>, attrs: &WidgetAttrs) -> String {
        let wrapper_class = if self.inline {
            "form-check form-check-inline"
        } else {
            "form-check"
        };

        self.choices
            .iter()
            .enumerate()
            .map(|(i, (opt_value, label))| {
                let checked = value.is_some_and(|v| v.contains(opt_value));
                check_option(
                    "checkbox",
                    wrapper_class,
                    name,
                    i,
                    (opt_value, label),
                    checked,
                    attrs,
                )
            })
            .collect()
    }

    fn input_type(&self) -> &str {
        "checkbox"
    }
}

/// Bootstrap 5 radio select widget.
#[derive(Debug, Clone, Default)]
pub struct BootstrapRadioSelect {
    /// Available choices (value, label).
    pub choices: Vec<(String, String)>,
    /// Whether to display inline.
    pub inline: bool,
}

impl BootstrapRadioSelect {
    /// Creates a new radio select with the given choices.
    pub fn new(choices: Vec<(impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            choices: choices
                .into_iter()
                .map(|(v, l)| (v.into(), l.into()))
                .collect(),
            inline: false,
        }
    }

    /// Makes the radios display inline.
    #[must_use]
    pub fn inline(mut self) -> Self {
        self.inline = true;
        self
    }
}

impl Widget for BootstrapRadioSelect {
    fn render(&self, name: &str, value: Option<&Value>, attrs: &WidgetAttrs) -> String {
        let wrapper_class = if self.inline {
            "form-check form-check-inline"
        } else {
            "form-check"
        };

        self.choices
            .iter()
            .enumerate()
            .map(|(i, (opt_value, label))| {
                let checked = value.is_some_and(|v| v.as_text() == opt_value.as_str());
                check_option(
                    "radio",
                    wrapper_class,
                    name,
                    i,
                    (opt_value, label),
                    checked,
                    attrs,
                )
            })
            .collect()
    }

    fn input_type(&self) -> &str {
        "radio"
    }
}
