//! Procedural macros for reqbind records.
//!
//! This crate provides `#[derive(Bind)]`, which generates the static field
//! table a record needs to be populated from request data.
//!
//! # Example
//!
//! ```rust,ignore
//! use reqbind::{Bind, FilePart};
//!
//! #[derive(Bind, Default)]
//! struct Upload {
//!     #[bind(json = "q", form = "query")]
//!     query: String,
//!     page: i64,
//!     tags: Vec<String>,
//!     file: Option<FilePart>,
//! }
//! ```
//!
//! # Field Attributes
//!
//! - `#[bind(key = "name")]`: external name under tag key `key`. Any number of
//!   tag keys may be given; an empty name behaves as if it were absent.
//! - `#[bind(skip)]`: leave the field out of binding.
//!
//! Fields without a tag for the active key are named after their identifier
//! with the first character lowercased.
//!
//! # Supported Types
//!
//! `String`, `i64`, `bool`, `f64`, `Option<FilePart>` and `Vec` of any of
//! `String`, `i64`, `bool`, `f64`, `FilePart`. Fields of other types are
//! still registered and fail at bind time when a value arrives for them.

mod bind;
mod parse;

use proc_macro::TokenStream;

/// Derives `reqbind::Bind` for a struct with named fields.
///
/// # Generated Code
///
/// The macro generates approximately:
///
/// ```rust,ignore
/// impl ::reqbind::Bind for Upload {
///     fn descriptors() -> &'static [::reqbind::FieldDescriptor<Self>] {
///         const FIELDS: &[::reqbind::FieldDescriptor<Upload>] = &[
///             ::reqbind::FieldDescriptor::new(
///                 "query",
///                 &[("json", "q"), ("form", "query")],
///                 ::reqbind::FieldType::Scalar(::reqbind::Kind::Text),
///                 {
///                     fn slot(record: &mut Upload) -> ::reqbind::Slot<'_> {
///                         ::reqbind::Slot::Text(&mut record.query)
///                     }
///                     slot
///                 },
///             ),
///             // ...
///         ];
///         FIELDS
///     }
/// }
/// ```
#[proc_macro_derive(Bind, attributes(bind))]
pub fn derive_bind(input: TokenStream) -> TokenStream {
    bind::expand_bind(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
