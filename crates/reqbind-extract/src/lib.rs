//! # reqbind Extract
//!
//! Request value sources and content-type dispatch for `reqbind`.
//!
//! This crate turns an already-received [`BindRequest`] into the value and
//! file sources the core binder consumes, and picks the decoding strategy
//! from the request's method and content type.
//!
//! ## Sources
//!
//! | Function | Source | Description |
//! |-----------|--------|-------------|
//! | [`query_values`] | URL query | Repeated keys keep every value |
//! | [`body_values`] | Request body | URL-encoded form body of `POST`/`PUT`/`PATCH` |
//! | [`parse_multipart`] | Request body | Multipart values and file parts, spilling large files |
//! | [`bind_json`] | Request body | Members of a JSON object |
//! | [`bind_xml`] | Request body | Child elements of an XML root |
//!
//! ## Example
//!
//! ```rust
//! use reqbind_core::{Bind, FieldDescriptor, FieldType, Kind, Slot};
//! use reqbind_extract::{unmarshal, BindRequest};
//! use http::{Method, Uri};
//!
//! #[derive(Default)]
//! struct Login {
//!     user: String,
//!     remember: bool,
//! }
//!
//! impl Bind for Login {
//!     fn descriptors() -> &'static [FieldDescriptor<Self>] {
//!         const FIELDS: &[FieldDescriptor<Login>] = &[
//!             FieldDescriptor::new("user", &[], FieldType::Scalar(Kind::Text), {
//!                 fn slot(l: &mut Login) -> Slot<'_> { Slot::Text(&mut l.user) }
//!                 slot
//!             }),
//!             FieldDescriptor::new("remember", &[], FieldType::Scalar(Kind::Boolean), {
//!                 fn slot(l: &mut Login) -> Slot<'_> { Slot::Boolean(&mut l.remember) }
//!                 slot
//!             }),
//!         ];
//!         FIELDS
//!     }
//! }
//!
//! # tokio_test::block_on(async {
//! let req = BindRequest::builder()
//!     .method(Method::POST)
//!     .uri(Uri::from_static("/login"))
//!     .header("content-type", "application/x-www-form-urlencoded")
//!     .body("user=alice&remember=t")
//!     .build();
//!
//! let mut login = Login::default();
//! unmarshal(&req, &mut login).await.unwrap();
//!
//! assert_eq!(login.user, "alice");
//! assert!(login.remember);
//! # });
//! ```
//!
//! ## Error Handling
//!
//! Every entry point returns [`ExtractionError`], which maps to an HTTP
//! status code with [`ExtractionError::status_code`].

#![doc(html_root_url = "https://docs.rs/reqbind-extract/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod dispatch;
mod error;
mod form;
mod multipart;
mod request;
mod structured;

pub use dispatch::{unmarshal, unmarshal_with, unpack, unpack_with, Source};
pub use error::ExtractionError;
pub use form::{body_values, parse_urlencoded, query_values};
pub use multipart::{multipart_boundary, parse_multipart, MultipartForm, VALUE_MEMORY_ALLOWANCE};
pub use request::{BindRequest, BindRequestBuilder};
pub use structured::{bind_json, bind_xml};
