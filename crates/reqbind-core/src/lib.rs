//! # reqbind Core
//!
//! The field-mapping and type-coercion engine behind `reqbind`.
//!
//! This crate provides the pieces every binding strategy shares:
//!
//! - [`Bind`] - Implemented by destination records; exposes a static table of
//!   [`FieldDescriptor`]s (usually generated with `#[derive(Bind)]`)
//! - [`Slot`] - Typed mutable access to one field, matched exhaustively on coercion
//! - [`ValueSource`] / [`FileSource`] - Ordered multimaps of raw values and file parts
//! - [`FilePart`] - Handle to an uploaded file's metadata and storage
//! - [`Binder`] - Resolves external names and writes values into a record
//! - [`BindConfig`] - Tag keys and multipart memory threshold, passed explicitly per call
//!
//! ## Example
//!
//! ```rust
//! use reqbind_core::{Bind, Binder, FieldDescriptor, FieldType, Kind, Slot, ValueSource};
//!
//! #[derive(Default)]
//! struct Search {
//!     query: String,
//!     page: i64,
//! }
//!
//! impl Bind for Search {
//!     fn descriptors() -> &'static [FieldDescriptor<Self>] {
//!         const FIELDS: &[FieldDescriptor<Search>] = &[
//!             FieldDescriptor::new("query", &[("json", "q")], FieldType::Scalar(Kind::Text), {
//!                 fn slot(record: &mut Search) -> Slot<'_> {
//!                     Slot::Text(&mut record.query)
//!                 }
//!                 slot
//!             }),
//!             FieldDescriptor::new("page", &[], FieldType::Scalar(Kind::Integer), {
//!                 fn slot(record: &mut Search) -> Slot<'_> {
//!                     Slot::Integer(&mut record.page)
//!                 }
//!                 slot
//!             }),
//!         ];
//!         FIELDS
//!     }
//! }
//!
//! let values: ValueSource = [("q", "rust"), ("page", "2")].into_iter().collect();
//! let mut search = Search::default();
//! Binder::new("json").bind(&mut search, &values).unwrap();
//!
//! assert_eq!(search.query, "rust");
//! assert_eq!(search.page, 2);
//! ```

#![doc(html_root_url = "https://docs.rs/reqbind-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod binder;
mod config;
mod error;
mod field;
mod file;
mod slot;
mod source;

pub use binder::{bind, default_name, Binder, FieldTable};
pub use config::{BindConfig, DEFAULT_MULTIPART_MAX_MEMORY, DEFAULT_TAG_KEY};
pub use error::{BindError, CoerceError, ConfigError};
pub use field::{Bind, FieldDescriptor, FieldType, Kind};
pub use file::FilePart;
pub use slot::{parse_bool, Slot};
pub use source::{FileSource, MultiMap, ValueSource};
