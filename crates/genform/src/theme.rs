//! Class names applied around the widgets.

/// Styling passed into [`crate::Form::render`].
///
/// Built once and shared by every render call; the defaults target
/// Bootstrap 5 with Tailwind-style grid classes on the field container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Wrapper around each field.
    pub field_class: String,
    pub label_class: String,
    /// Error text under an invalid field; left-aligned.
    pub error_class: String,
    /// Class added to the control of an invalid field.
    pub invalid_class: String,
    pub help_class: String,
    /// Wrapper around the submit control.
    pub submit_wrapper_class: String,
    pub button_class: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            field_class: "mb-3".to_string(),
            label_class: "form-label".to_string(),
            error_class: "invalid-feedback d-block text-start".to_string(),
            invalid_class: "is-invalid".to_string(),
            help_class: "form-text".to_string(),
            submit_wrapper_class: "mt-4".to_string(),
            button_class: "btn btn-primary w-100".to_string(),
        }
    }
}

impl Theme {
    /// Creates the default theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the submit button classes.
    #[must_use]
    pub fn button_class(mut self, class: impl Into<String>) -> Self {
        self.button_class = class.into();
        self
    }

    /// Sets the error text classes.
    #[must_use]
    pub fn error_class(mut self, class: impl Into<String>) -> Self {
        self.error_class = class.into();
        self
    }

    /// Sets the field wrapper classes.
    #[must_use]
    pub fn field_class(mut self, class: impl Into<String>) -> Self {
        self.field_class = class.into();
        self
    }
}
