//! Field dispatch: from a descriptor to its validator and its widget.

use std::fmt;

use ironhtml::typed::Element;
use ironhtml_elements::{Div, Label};
use tracing::{debug, warn};

use crate::error::{FieldError, Result};
use crate::layout::{self, LayoutConfig, Placement};
use crate::schema::{upper_first, FieldDescriptor, FieldKind, Orientation, Value};
use crate::theme::Theme;
use crate::validation::date_format::{DateFormat, DEFAULT_DATETIME_FORMAT, DEFAULT_DATE_FORMAT};
use crate::validation::rules::{self, Rule};
use crate::validation::{ValidateFn, ValidationStyle, Validator};
use crate::widgets::{
    BootstrapCheckboxGroup, BootstrapRadioSelect, BootstrapSelect, BootstrapTextInput,
    BootstrapTextarea, Widget, WidgetAttrs,
};

/// Where a field's validator came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatorSource {
    /// The descriptor's explicit `validate_fn`.
    Override,
    /// The built-in rule of a recognized style.
    Style(ValidationStyle),
    /// The `text` rule: no style, or a style without a rule.
    Fallback,
}

impl fmt::Display for ValidatorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Override => f.write_str("override"),
            Self::Style(style) => write!(f, "style:{style}"),
            Self::Fallback => f.write_str("fallback"),
        }
    }
}

#[derive(Clone)]
enum Check {
    Override(ValidateFn),
    Rule(Rule),
}

/// The validator chosen for a field.
#[derive(Clone)]
pub struct ResolvedValidator {
    source: ValidatorSource,
    check: Check,
}

impl fmt::Debug for ResolvedValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedValidator")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl ResolvedValidator {
    pub fn source(&self) -> &ValidatorSource {
        &self.source
    }
}

impl Validator for ResolvedValidator {
    fn validate(
        &self,
        field: &FieldDescriptor,
        value: Option<&Value>,
    ) -> std::result::Result<(), FieldError> {
        match &self.check {
            Check::Override(f) => f(field, value),
            Check::Rule(rule) => rule(field, value),
        }
    }
}

/// Picks the validator for a field: the explicit override, else the rule of
/// a recognized style, else the `text` rule.
pub fn resolve_validator(field: &FieldDescriptor) -> ResolvedValidator {
    let resolved = if let Some(f) = &field.validation.validate_fn {
        ResolvedValidator {
            source: ValidatorSource::Override,
            check: Check::Override(f.clone()),
        }
    } else {
        match &field.validation.style {
            Some(style) => match rules::rule_for(style) {
                Some(rule) => ResolvedValidator {
                    source: ValidatorSource::Style(style.clone()),
                    check: Check::Rule(rule),
                },
                None => {
                    warn!(
                        field = %field.key,
                        %style,
                        "unknown validation style, falling back to text"
                    );
                    fallback()
                }
            },
            None => fallback(),
        }
    };

    debug!(field = %field.key, source = %resolved.source, "resolved validator");
    resolved
}

fn fallback() -> ResolvedValidator {
    ResolvedValidator {
        source: ValidatorSource::Fallback,
        check: Check::Rule(rules::text),
    }
}

/// Props every widget receives from the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonProps {
    pub label: String,
    /// Change binding: the input `name`, equal to the field key.
    pub name: String,
    pub value: Option<Value>,
    pub error: Option<String>,
    pub placement: Placement,
}

impl CommonProps {
    /// Derives the props of `field` from its current value and error.
    pub fn for_field(
        field: &FieldDescriptor,
        layout: Option<&LayoutConfig>,
        value: Option<&Value>,
        error: Option<&FieldError>,
    ) -> Self {
        Self {
            label: field.label(),
            name: field.key.clone(),
            value: value.cloned(),
            error: error.map(|e| e.message.clone()),
            placement: layout::placement_for(layout, field.column_span),
        }
    }
}

/// The concrete widget chosen for a field kind.
#[derive(Debug, Clone)]
pub enum FieldWidget {
    Show(BootstrapTextInput),
    Text(BootstrapTextInput),
    Password(BootstrapTextInput),
    Number(BootstrapTextInput),
    TextArea(BootstrapTextarea),
    Date {
        input: BootstrapTextInput,
        format: DateFormat,
    },
    Datetime {
        input: BootstrapTextInput,
        format: DateFormat,
    },
    Select(BootstrapSelect),
    CheckboxGroup(BootstrapCheckboxGroup),
    RadioGroup(BootstrapRadioSelect),
}

impl FieldWidget {
    /// The widget used for `field`, by kind.
    pub fn for_field(field: &FieldDescriptor) -> Result<Self> {
        field.ensure_choice_data()?;
        let props = &field.props;

        let text_input = |input: BootstrapTextInput| match &props.placeholder {
            Some(p) => input.placeholder(p.clone()),
            None => input,
        };

        let widget = match field.kind {
            FieldKind::Show => Self::Show(BootstrapTextInput::read_only()),
            FieldKind::Text => Self::Text(text_input(
                match field.validation.style {
                    Some(ValidationStyle::Email) => BootstrapTextInput::email(),
                    _ => BootstrapTextInput::new(),
                },
            )),
            FieldKind::Password => Self::Password(text_input(BootstrapTextInput::password())),
            FieldKind::Number => {
                let input = text_input(BootstrapTextInput::number());
                Self::Number(match props.step {
                    Some(step) => input.step(step),
                    None => input,
                })
            }
            FieldKind::TextArea => {
                let area = BootstrapTextarea::new(props.rows.unwrap_or(4));
                Self::TextArea(match &props.placeholder {
                    Some(p) => area.placeholder(p.clone()),
                    None => area,
                })
            }
            FieldKind::Date => {
                let format = date_format(field, DEFAULT_DATE_FORMAT);
                Self::Date {
                    input: BootstrapTextInput::date(format.tokens()),
                    format,
                }
            }
            FieldKind::Datetime => {
                let format = date_format(field, DEFAULT_DATETIME_FORMAT);
                Self::Datetime {
                    input: BootstrapTextInput::datetime(format.tokens()),
                    format,
                }
            }
            FieldKind::Select => {
                let choices: Vec<(&str, &str)> = field
                    .choice_data
                    .iter()
                    .map(|c| (c.as_str(), c.as_str()))
                    .collect();
                let mut select = BootstrapSelect::new(choices);
                if props.hide_blank {
                    select = select.no_blank();
                }
                if let Some(label) = &props.blank_label {
                    select = select.blank_label(label.clone());
                }
                Self::Select(select)
            }
            FieldKind::Checkbox => {
                let group = BootstrapCheckboxGroup::new(labeled_choices(field));
                Self::CheckboxGroup(match field.orientation {
                    Orientation::Horizontal => group.inline(),
                    Orientation::Vertical => group,
                })
            }
            FieldKind::Boolean => {
                let group = BootstrapRadioSelect::new(labeled_choices(field));
                Self::RadioGroup(match field.orientation {
                    Orientation::Horizontal => group.inline(),
                    Orientation::Vertical => group,
                })
            }
        };

        Ok(widget)
    }

    /// The underlying toolkit widget.
    pub fn widget(&self) -> &dyn Widget {
        match self {
            Self::Show(w) | Self::Text(w) | Self::Password(w) | Self::Number(w) => w,
            Self::TextArea(w) => w,
            Self::Date { input, .. } | Self::Datetime { input, .. } => input,
            Self::Select(w) => w,
            Self::CheckboxGroup(w) => w,
            Self::RadioGroup(w) => w,
        }
    }

    /// Whether the widget renders one sub-control per option.
    pub fn is_group(&self) -> bool {
        matches!(self, Self::CheckboxGroup(_) | Self::RadioGroup(_))
    }

    /// The value as the widget displays it. Typed dates are formatted with
    /// the field's date format.
    fn display_value(&self, value: &Value) -> Value {
        let format = match self {
            Self::Date { format, .. } | Self::Datetime { format, .. } => format,
            _ => return value.clone(),
        };
        match value {
            Value::Date(d) => Value::Text(format.format(&d.and_time(chrono::NaiveTime::MIN))),
            Value::DateTime(dt) => Value::Text(format.format(dt)),
            other => other.clone(),
        }
    }
}

fn date_format(field: &FieldDescriptor, default: &str) -> DateFormat {
    DateFormat::new(
        field
            .validation
            .options
            .date_format
            .as_deref()
            .unwrap_or(default),
    )
}

fn labeled_choices(field: &FieldDescriptor) -> Vec<(String, String)> {
    field
        .choice_data
        .iter()
        .map(|c| (c.clone(), upper_first(c)))
        .collect()
}

/// A field resolved to a widget, with everything needed to render it.
#[derive(Debug, Clone)]
pub struct FieldControl {
    pub widget: FieldWidget,
    pub props: CommonProps,
    pub attrs: WidgetAttrs,
    pub help_text: Option<String>,
}

impl FieldControl {
    /// Renders the field: label, control, error text and help text inside
    /// a wrapper placed on the grid.
    pub fn to_html(&self, theme: &Theme) -> String {
        let props = &self.props;
        let mut attrs = self.attrs.clone();
        if props.error.is_some() {
            attrs.add_class(&theme.invalid_class);
            attrs.set("aria-invalid", "true");
        }

        let value = props.value.as_ref().map(|v| self.widget.display_value(v));
        let widget_html = self.widget.widget().render(&props.name, value.as_ref(), &attrs);

        let id = match attrs.get("id") {
            Some(id) if self.widget.is_group() => format!("{id}_0"),
            Some(id) => id.clone(),
            None => format!("id_{}", props.name),
        };
        let style = props.placement.style();
        let error = props.error.clone();
        let help_text = self.help_text.clone();

        Element::<Div>::new()
            .class(&theme.field_class)
            .attr("style", &style)
            .child::<Label, _>(|l| {
                l.attr("for", &id)
                    .class(&theme.label_class)
                    .text(&props.label)
            })
            .raw(&widget_html)
            .when(error.is_some(), |d| {
                d.child::<Div, _>(|e| {
                    e.class(&theme.error_class)
                        .text(error.as_deref().unwrap_or(""))
                })
            })
            .when(help_text.is_some(), |d| {
                d.child::<Div, _>(|h| {
                    h.class(&theme.help_class)
                        .text(help_text.as_deref().unwrap_or(""))
                })
            })
            .render()
    }
}

/// Result of dispatching a field.
#[derive(Debug, Clone)]
pub enum RenderedField {
    /// Output of the descriptor's `custom_render`, placed on the grid as-is.
    Custom { html: String, placement: Placement },
    Widget(FieldControl),
}

impl RenderedField {
    pub fn to_html(&self, theme: &Theme) -> String {
        match self {
            Self::Custom { html, placement } => {
                let style = placement.style();
                Element::<Div>::new().attr("style", &style).raw(html).render()
            }
            Self::Widget(control) => control.to_html(theme),
        }
    }
}

/// Resolves the widget for `field` and binds it to `props`.
///
/// A `custom_render` takes over entirely and receives the descriptor
/// verbatim. Choice kinds without options fail with
/// [`crate::FormError::MissingChoiceData`].
pub fn render_widget(field: &FieldDescriptor, props: CommonProps) -> Result<RenderedField> {
    if let Some(render) = &field.custom_render {
        return Ok(RenderedField::Custom {
            html: render(field),
            placement: props.placement,
        });
    }

    let widget = FieldWidget::for_field(field)?;

    let mut attrs = WidgetAttrs::new().with("id", format!("id_{}", field.key));
    if let Some(class) = &field.props.class {
        attrs.add_class(class);
    }
    if field.props.disabled {
        attrs.set("disabled", "disabled");
    }

    Ok(RenderedField::Widget(FieldControl {
        widget,
        props,
        attrs,
        help_text: field.props.help_text.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, FormError};
    use crate::layout::LayoutItem;
    use crate::validation::ValidationOptions;

    fn props(field: &FieldDescriptor, value: Option<Value>) -> CommonProps {
        CommonProps::for_field(field, Some(&LayoutConfig::default()), value.as_ref(), None)
    }

    fn html(field: &FieldDescriptor, value: Option<Value>) -> String {
        render_widget(field, props(field, value))
            .unwrap()
            .to_html(&Theme::default())
    }

    #[test]
    fn test_resolution_order() {
        let styled = FieldDescriptor::new("age", FieldKind::Number).style("number");
        assert_eq!(
            resolve_validator(&styled).source(),
            &ValidatorSource::Style(ValidationStyle::Number)
        );

        let overridden = styled.clone().validate_fn(|_, _| Ok(()));
        assert_eq!(resolve_validator(&overridden).source(), &ValidatorSource::Override);

        let plain = FieldDescriptor::new("name", FieldKind::Text);
        assert_eq!(resolve_validator(&plain).source(), &ValidatorSource::Fallback);

        let unknown = FieldDescriptor::new("zip", FieldKind::Text).style("postcode");
        assert_eq!(resolve_validator(&unknown).source(), &ValidatorSource::Fallback);
    }

    #[test]
    fn test_override_wins_over_failing_style() {
        let field = FieldDescriptor::new("age", FieldKind::Number)
            .style("number")
            .options(ValidationOptions::new().min(10))
            .validate_fn(|_, _| Ok(()));
        let validator = resolve_validator(&field);
        assert!(validator.validate(&field, Some(&Value::from("9"))).is_ok());
    }

    #[test]
    fn test_fallback_requires_a_value() {
        let field = FieldDescriptor::new("name", FieldKind::Text);
        let err = resolve_validator(&field).validate(&field, None).unwrap_err();
        assert_eq!(err.kind, ErrorKind::RequiredMissing);
    }

    #[test]
    fn test_widget_per_kind() {
        let cases = [
            (FieldKind::Show, "text"),
            (FieldKind::Text, "text"),
            (FieldKind::Password, "password"),
            (FieldKind::Number, "number"),
            (FieldKind::TextArea, "textarea"),
            (FieldKind::Date, "date"),
            (FieldKind::Datetime, "datetime-local"),
        ];
        for (kind, input_type) in cases {
            let widget = FieldWidget::for_field(&FieldDescriptor::new("f", kind)).unwrap();
            assert_eq!(widget.widget().input_type(), input_type, "{kind}");
        }

        let choice = |kind| FieldDescriptor::new("f", kind).choices(["a", "b"]);
        assert!(matches!(
            FieldWidget::for_field(&choice(FieldKind::Select)).unwrap(),
            FieldWidget::Select(_)
        ));
        assert!(matches!(
            FieldWidget::for_field(&choice(FieldKind::Checkbox)).unwrap(),
            FieldWidget::CheckboxGroup(_)
        ));
        assert!(matches!(
            FieldWidget::for_field(&choice(FieldKind::Boolean)).unwrap(),
            FieldWidget::RadioGroup(_)
        ));
    }

    #[test]
    fn test_choice_kinds_without_data_fail() {
        for kind in [FieldKind::Select, FieldKind::Checkbox, FieldKind::Boolean] {
            let field = FieldDescriptor::new("f", kind);
            let err = render_widget(&field, props(&field, None)).unwrap_err();
            assert!(matches!(err, FormError::MissingChoiceData { .. }));
        }
    }

    #[test]
    fn test_rendered_field_has_label_value_and_placement() {
        let field = FieldDescriptor::new("major", FieldKind::Text).span(2);
        let out = html(&field, Some(Value::from("jsj")));
        assert!(out.contains(r#"for="id_major""#));
        assert!(out.contains(">Major</label>"));
        assert!(out.contains(r#"value="jsj""#));
        assert!(out.contains("grid-column: span 2 / span 2;"));
    }

    #[test]
    fn test_error_text_is_left_aligned() {
        let field = FieldDescriptor::new("age", FieldKind::Number);
        let error = FieldError::new(ErrorKind::BelowMinimum, "Too young");
        let props = CommonProps::for_field(&field, None, None, Some(&error));
        let out = render_widget(&field, props).unwrap().to_html(&Theme::default());
        assert!(out.contains("is-invalid"));
        assert!(out.contains("text-start"));
        assert!(out.contains("Too young"));
    }

    #[test]
    fn test_choice_labels_are_upper_first() {
        let field = FieldDescriptor::new("gender", FieldKind::Boolean).choices(["male", "female"]);
        let out = html(&field, Some(Value::from("female")));
        assert!(out.contains(r#"value="male""#));
        assert!(out.contains(">Male</label>"));
        assert!(out.contains(r#"value="female" checked"#));
        assert!(out.contains("form-check-inline"));

        let vertical = field.vertical();
        assert!(!html(&vertical, None).contains("form-check-inline"));
    }

    #[test]
    fn test_date_widget_receives_format() {
        let field = FieldDescriptor::new("birthday", FieldKind::Date)
            .options(ValidationOptions::new().date_format("DD/MM/YYYY"));
        let day = chrono::NaiveDate::from_ymd_opt(2024, 10, 9).unwrap();
        let out = html(&field, Some(Value::from(day)));
        assert!(out.contains(r#"data-date-format="DD/MM/YYYY""#));
        assert!(out.contains(r#"value="09/10/2024""#));
    }

    #[test]
    fn test_custom_render_receives_descriptor() {
        let field = FieldDescriptor::new("note", FieldKind::Select)
            .span(2)
            .render(|f| format!("<p>{}</p>", f.key));
        let out = html(&field, None);
        assert!(out.contains("<p>note</p>"));
        assert!(out.contains("span 2 / span 2"));
    }

    #[test]
    fn test_email_style_renders_email_input() {
        let field = FieldDescriptor::new("email", FieldKind::Text).style("email");
        assert!(html(&field, None).contains(r#"type="email""#));

        let plain = FieldDescriptor::new("name", FieldKind::Text);
        assert!(html(&plain, None).contains(r#"type="text""#));
    }

    #[test]
    fn test_passthrough_props() {
        let field = FieldDescriptor::new("bio", FieldKind::TextArea)
            .placeholder("About you")
            .help_text("Markdown allowed")
            .disabled();
        let out = html(&field, None);
        assert!(out.contains(r#"placeholder="About you""#));
        assert!(out.contains(r#"disabled="disabled""#));
        assert!(out.contains("Markdown allowed"));
    }

    #[test]
    fn test_placement_clamps_to_layout() {
        let layout = LayoutConfig::empty().md(LayoutItem::columns(1));
        let field = FieldDescriptor::new("bio", FieldKind::Text).span(3);
        let props = CommonProps::for_field(&field, Some(&layout), None, None);
        assert_eq!(props.placement.span, 1);
    }
}
