//! # genform
//!
//! Declarative form generation: describe fields as data, get a rendered
//! Bootstrap 5 form, per-field validation and a typed submission callback.
//!
//! This crate provides:
//! - Field descriptors and form schemas, built in Rust or loaded from JSON
//! - A validation rule engine keyed by style (text, number, email, phone,
//!   url, date, datetime)
//! - A responsive grid layout resolver
//! - Bootstrap 5 widgets and a form orchestrator
//!
//! ## Quick Start
//!
//! ```rust
//! use genform::schema::{FieldDescriptor, FieldKind, ValueMap};
//! use genform::validation::ValidationOptions;
//! use genform::{Form, FormSchema, Theme};
//!
//! let schema = FormSchema::builder()
//!     .field(FieldDescriptor::new("name", FieldKind::Text))
//!     .field(
//!         FieldDescriptor::new("age", FieldKind::Number)
//!             .style("number")
//!             .options(ValidationOptions::new().min(10).max(12)),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let mut form = Form::new(schema, |values: ValueMap| {
//!     println!("submitted {values:?}");
//! });
//! form.set_value("name", "Alice").unwrap();
//! form.set_value("age", "11").unwrap();
//!
//! let html = form.render(&Theme::default()).unwrap();
//! assert!(html.contains("Submit"));
//! assert!(form.submit().is_ok());
//! ```
//!
//! ## Typed submissions
//!
//! ```rust
//! use genform::fields::{email_field, text_field};
//! use genform::{Form, FormError, FormSchema};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Signup {
//!     name: String,
//!     email: String,
//! }
//!
//! let schema = FormSchema::builder()
//!     .field(text_field("name", true))
//!     .field(email_field("email", true))
//!     .build()
//!     .unwrap();
//!
//! let mut form = Form::new(schema, |signup: Signup| {
//!     assert_eq!(signup.name, "Alice");
//!     assert_eq!(signup.email, "a@b.com");
//! });
//! form.set_value("name", "Alice").unwrap();
//! form.set_value("email", "not-an-email").unwrap();
//! assert!(matches!(form.submit(), Err(FormError::Validation(_))));
//!
//! form.set_value("email", "a@b.com").unwrap();
//! assert!(form.submit().is_ok());
//! ```

pub mod dispatch;
mod error;
pub mod fields;
pub mod form;
pub mod layout;
pub mod schema;
mod theme;
pub mod validation;
pub mod widgets;

pub use error::{ErrorKind, FieldError, FormError, Result, ValidationErrors};
pub use form::{Form, FieldStatus};
pub use layout::{LayoutConfig, LayoutItem, OverflowPolicy};
pub use schema::{FieldDescriptor, FieldKind, FormSchema, Value, ValueMap};
pub use theme::Theme;
