//! Shorthand constructors for common field descriptors.
//!
//! Each helper returns a plain [`FieldDescriptor`](crate::schema::FieldDescriptor)
//! with its kind and validation style set; chain further builder calls to
//! refine it.

mod checkbox;
mod select;
mod temporal;
mod text;

pub use checkbox::{boolean_field, checkbox_field};
pub use select::select_field;
pub use temporal::{date_field, datetime_field};
pub use text::{
    email_field, number_field, password_field, phone_field, show_field, text_area_field,
    text_field, url_field,
};
