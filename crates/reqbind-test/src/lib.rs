//! # reqbind Test
//!
//! Test utilities for reqbind: fluent builders for the requests handed to the
//! binding entry points, and a `multipart/form-data` body builder.
//!
//! ## Example
//!
//! ```rust
//! use reqbind_test::{MultipartBody, TestRequest};
//!
//! let body = MultipartBody::new()
//!     .text("hello", "world")
//!     .file("file", "hello.txt", "text/plain", "Hello, World!");
//!
//! let request = TestRequest::post("/upload")
//!     .multipart(body)
//!     .into_bind_request()
//!     .unwrap();
//!
//! assert!(request
//!     .content_type()
//!     .unwrap()
//!     .starts_with("multipart/form-data; boundary="));
//! ```

#![doc(html_root_url = "https://docs.rs/reqbind-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod multipart;
mod request;

pub use error::TestError;
pub use multipart::{MultipartBody, DEFAULT_BOUNDARY};
pub use request::{TestRequest, TestRequestBuilder};
