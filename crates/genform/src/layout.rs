//! Responsive grid layout.
//!
//! A [`LayoutConfig`] gives a `{columns, gap}` pair per breakpoint. The
//! resolver turns it into the container's grid classes and each field's
//! column placement.

use serde::Deserialize;
use tracing::warn;

use crate::error::{FormError, Result};

/// Responsive breakpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Breakpoint {
    Xs,
    Md,
    Lg,
    Xl,
}

impl Breakpoint {
    /// Breakpoints from largest to smallest: the order in which the governing
    /// column count is looked up.
    pub const PRIORITY: [Self; 4] = [Self::Xl, Self::Lg, Self::Md, Self::Xs];

    /// Breakpoints from smallest to largest: the order of emitted classes.
    pub const ASCENDING: [Self; 4] = [Self::Xs, Self::Md, Self::Lg, Self::Xl];

    /// Class prefix; `xs` is the unprefixed base.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Xs => "",
            Self::Md => "md:",
            Self::Lg => "lg:",
            Self::Xl => "xl:",
        }
    }
}

/// Column count and gap (in pixels) at one breakpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LayoutItem {
    #[serde(alias = "col")]
    pub columns: Option<u16>,
    pub gap: Option<u16>,
}

impl LayoutItem {
    /// Creates an item with the given column count and gap.
    #[must_use]
    pub const fn new(columns: u16, gap: u16) -> Self {
        Self {
            columns: Some(columns),
            gap: Some(gap),
        }
    }

    /// Creates an item with only a column count.
    #[must_use]
    pub const fn columns(columns: u16) -> Self {
        Self {
            columns: Some(columns),
            gap: None,
        }
    }
}

/// What to do when a field asks for more columns than the grid has.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Clamp the span to the governing column count.
    #[default]
    Clamp,
    /// Refuse to build the schema.
    Reject,
}

/// Per-breakpoint layout configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LayoutConfig {
    pub xl: Option<LayoutItem>,
    pub lg: Option<LayoutItem>,
    pub md: Option<LayoutItem>,
    pub xs: Option<LayoutItem>,
    #[serde(default)]
    pub overflow: OverflowPolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::empty().xl(LayoutItem::new(2, 20))
    }
}

impl LayoutConfig {
    /// A configuration with no breakpoints: a single-column grid.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            xl: None,
            lg: None,
            md: None,
            xs: None,
            overflow: OverflowPolicy::Clamp,
        }
    }

    /// Sets the `xl` breakpoint.
    #[must_use]
    pub fn xl(mut self, item: LayoutItem) -> Self {
        self.xl = Some(item);
        self
    }

    /// Sets the `lg` breakpoint.
    #[must_use]
    pub fn lg(mut self, item: LayoutItem) -> Self {
        self.lg = Some(item);
        self
    }

    /// Sets the `md` breakpoint.
    #[must_use]
    pub fn md(mut self, item: LayoutItem) -> Self {
        self.md = Some(item);
        self
    }

    /// Sets the `xs` breakpoint.
    #[must_use]
    pub fn xs(mut self, item: LayoutItem) -> Self {
        self.xs = Some(item);
        self
    }

    /// Sets the overflow policy.
    #[must_use]
    pub fn overflow(mut self, policy: OverflowPolicy) -> Self {
        self.overflow = policy;
        self
    }

    /// The item configured for a breakpoint.
    #[must_use]
    pub fn get(&self, breakpoint: Breakpoint) -> Option<&LayoutItem> {
        match breakpoint {
            Breakpoint::Xs => self.xs.as_ref(),
            Breakpoint::Md => self.md.as_ref(),
            Breakpoint::Lg => self.lg.as_ref(),
            Breakpoint::Xl => self.xl.as_ref(),
        }
    }

    /// The largest configured breakpoint with a column count, and that count.
    #[must_use]
    pub fn governing_columns(&self) -> Option<(Breakpoint, u16)> {
        Breakpoint::PRIORITY.iter().find_map(|&bp| {
            self.get(bp)
                .and_then(|item| item.columns)
                .filter(|&columns| columns > 0)
                .map(|columns| (bp, columns))
        })
    }
}

/// Where a field sits in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Number of columns spanned, at least one.
    pub span: u16,
}

impl Placement {
    /// The CSS `grid-column` value.
    #[must_use]
    pub fn grid_column(&self) -> String {
        format!("span {0} / span {0}", self.span)
    }

    /// The inline style attribute value.
    #[must_use]
    pub fn style(&self) -> String {
        format!("grid-column: {};", self.grid_column())
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self { span: 1 }
    }
}

/// Responsive grid classes for the field container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    pub classes: Vec<String>,
}

impl ContainerSpec {
    /// The space-separated class attribute value.
    #[must_use]
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }
}

/// Resolves a field's placement under the layout's overflow policy.
///
/// `key` names the field in warnings and errors.
pub fn resolve_placement(
    layout: Option<&LayoutConfig>,
    key: &str,
    column_span: Option<u16>,
) -> Result<Placement> {
    let (Some(layout), Some(span)) = (layout, column_span) else {
        return Ok(Placement::default());
    };
    let Some((breakpoint, columns)) = layout.governing_columns() else {
        return Ok(Placement::default());
    };
    let span = span.max(1);

    if span <= columns {
        return Ok(Placement { span });
    }

    match layout.overflow {
        OverflowPolicy::Clamp => {
            warn!(
                field = key,
                span,
                columns,
                ?breakpoint,
                "column span exceeds the grid, clamping"
            );
            Ok(Placement { span: columns })
        }
        OverflowPolicy::Reject => Err(FormError::SpanOverflow {
            key: key.to_string(),
            span,
            columns,
        }),
    }
}

/// The placement of a field requesting `column_span` columns.
///
/// Overflowing spans are always clamped here; [`resolve_placement`] applies
/// the reject policy.
#[must_use]
pub fn placement_for(layout: Option<&LayoutConfig>, column_span: Option<u16>) -> Placement {
    let clamped = layout.map(|l| l.clone().overflow(OverflowPolicy::Clamp));
    resolve_placement(clamped.as_ref(), "", column_span).unwrap_or_default()
}

/// The grid classes of the field container.
#[must_use]
pub fn container_class_for(layout: Option<&LayoutConfig>) -> ContainerSpec {
    let mut classes = vec!["grid".to_string()];
    let xs_configured = layout
        .and_then(|l| l.xs.as_ref())
        .is_some_and(|item| item.columns.is_some());
    if !xs_configured {
        classes.push("grid-cols-1".to_string());
    }

    if let Some(layout) = layout {
        for bp in Breakpoint::ASCENDING {
            let Some(item) = layout.get(bp) else {
                continue;
            };
            if let Some(columns) = item.columns {
                classes.push(format!("{}grid-cols-{}", bp.prefix(), columns.max(1)));
            }
            if let Some(gap) = item.gap {
                classes.push(format!("{}gap-[{gap}px]", bp.prefix()));
            }
        }
    }

    ContainerSpec { classes }
}
