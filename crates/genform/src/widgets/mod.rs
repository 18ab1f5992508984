//! Form widgets for rendering HTML inputs.
//!
//! The widget toolkit is a collaborator of the form core: the dispatcher
//! decides which widget a field gets, widgets only turn a name, a value and
//! attributes into markup.

mod bootstrap;

pub use bootstrap::{
    BootstrapCheckboxGroup, BootstrapRadioSelect, BootstrapSelect, BootstrapTextInput,
    BootstrapTextarea,
};

use std::collections::BTreeMap;

use crate::schema::Value;

/// Attributes that can be applied to a widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetAttrs {
    /// HTML attributes, ordered so output is stable.
    pub attrs: BTreeMap<String, String>,
}

impl WidgetAttrs {
    /// Creates new empty widget attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    /// Gets an attribute.
    pub fn get(&self, key: &str) -> Option<&String> {
        self.attrs.get(key)
    }

    /// Appends a class to the `class` attribute.
    pub fn add_class(&mut self, class: &str) {
        let merged = match self.attrs.get("class") {
            Some(current) if !current.is_empty() => format!("{current} {class}"),
            _ => class.to_string(),
        };
        self.attrs.insert("class".to_string(), merged);
    }

    /// Renders the attributes other than `class` and `id` as ` k="v"` pairs.
    pub fn extra_html(&self) -> String {
        self.attrs
            .iter()
            .filter(|(k, _)| k.as_str() != "class" && k.as_str() != "id")
            .map(|(k, v)| format!(r#" {k}="{}""#, html_escape(v)))
            .collect()
    }

    /// Builder method to set an attribute.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }
}

/// Trait for form widgets that render HTML inputs.
pub trait Widget: Send + Sync {
    /// Renders the widget as HTML.
    ///
    /// # Arguments
    /// * `name` - The field name (used for the name attribute)
    /// * `value` - The current value (if any)
    /// * `attrs` - Additional HTML attributes
    fn render(&self, name: &str, value: Option<&Value>, attrs: &WidgetAttrs) -> String;

    /// Returns the HTML input type.
    fn input_type(&self) -> &str {
        "text"
    }
}

/// Resolves the element id: the `id` attribute, else `id_{name}`.
fn element_id(name: &str, attrs: &WidgetAttrs) -> String {
    attrs
        .get("id")
        .cloned()
        .unwrap_or_else(|| format!("id_{name}"))
}

/// Joins a base class with the `class` attribute, if any.
fn class_list(base: &str, attrs: &WidgetAttrs) -> String {
    match attrs.get("class") {
        Some(extra) if !extra.is_empty() => format!("{base} {extra}"),
        _ => base.to_string(),
    }
}

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("\"test\""), "&quot;test&quot;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
    }

    #[test]
    fn test_widget_attrs_are_ordered() {
        let attrs = WidgetAttrs::new()
            .with("required", "required")
            .with("class", "form-control")
            .with("disabled", "disabled")
            .with("id", "my-input");
        assert_eq!(attrs.extra_html(), r#" disabled="disabled" required="required""#);
    }

    #[test]
    fn test_add_class() {
        let mut attrs = WidgetAttrs::new();
        attrs.add_class("is-invalid");
        attrs.add_class("w-100");
        assert_eq!(attrs.get("class").map(String::as_str), Some("is-invalid w-100"));
        assert_eq!(class_list("form-control", &attrs), "form-control is-invalid w-100");
    }
}
