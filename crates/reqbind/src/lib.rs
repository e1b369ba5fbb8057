//! # reqbind
//!
//! **Bind HTTP request data into typed records.**
//!
//! reqbind populates a plain struct from a request's URL query, URL-encoded
//! body, `multipart/form-data` body, JSON document or XML document. Fields are
//! matched by external name and coerced to their declared type:
//!
//! - Text, integer, boolean and float fields, and `Vec`s of those
//! - Uploaded files as [`FilePart`] handles, alone or in a `Vec`
//! - Per-field names under any tag key with `#[bind(key = "name")]`
//! - Fields without a matching value keep whatever they held before
//!
//! ## Quick Start
//!
//! ```rust
//! use reqbind::prelude::*;
//!
//! #[derive(Bind, Default, Debug)]
//! struct Search {
//!     #[bind(json = "q")]
//!     query: String,
//!     page: i64,
//!     tags: Vec<String>,
//! }
//!
//! # tokio_test::block_on(async {
//! let req = BindRequest::builder()
//!     .uri("/search?q=rust&page=2&tags=a&tags=b".parse().unwrap())
//!     .build();
//!
//! let mut search = Search::default();
//! reqbind::unmarshal(&req, &mut search).await.unwrap();
//!
//! assert_eq!(search.query, "rust");
//! assert_eq!(search.page, 2);
//! assert_eq!(search.tags, ["a", "b"]);
//! # });
//! ```
//!
//! ## Strategies
//!
//! [`unmarshal`] chooses a strategy from the request:
//!
//! ```text
//! GET / DELETE / HEAD / TRACE ─→ URL query
//! application/x-www-form-urlencoded ─→ body
//! multipart/form-data ─→ values, then files
//! application/json ─→ members of the root object
//! application/xml ─→ children of the root element
//! anything else ─→ ExtractionError::UnsupportedMediaType
//! ```
//!
//! [`unpack_with`] binds from one explicit [`Source`] instead, including the
//! merged modes where query values override body values.

#![doc(html_root_url = "https://docs.rs/reqbind/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use reqbind_core as core;

// Re-export request extraction
pub use reqbind_extract as extract;

pub use reqbind_core::{
    bind, default_name, parse_bool, Bind, BindConfig, BindError, Binder, CoerceError,
    ConfigError, FieldDescriptor, FieldTable, FieldType, FilePart, FileSource, Kind, MultiMap,
    Slot, ValueSource, DEFAULT_MULTIPART_MAX_MEMORY, DEFAULT_TAG_KEY,
};

pub use reqbind_extract::{
    bind_json, bind_xml, body_values, multipart_boundary, parse_multipart, parse_urlencoded,
    query_values, unmarshal, unmarshal_with, unpack, unpack_with, BindRequest,
    BindRequestBuilder, ExtractionError, MultipartForm, Source, VALUE_MEMORY_ALLOWANCE,
};

// Re-export the derive; it shares its name with the trait
pub use reqbind_macros::Bind;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use reqbind::prelude::*;
/// ```
pub mod prelude {
    pub use reqbind_core::{Bind, BindConfig, FilePart};

    pub use reqbind_extract::{
        unmarshal, unmarshal_with, unpack, unpack_with, BindRequest, ExtractionError, Source,
    };

    pub use reqbind_macros::Bind;
}
