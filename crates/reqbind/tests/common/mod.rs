//! Shared fixtures for the reqbind integration tests.

#![allow(dead_code)]

use reqbind::{Bind, FilePart};
use reqbind_test::MultipartBody;
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once. Set `RUST_LOG=reqbind=trace` to see
/// dispatch decisions and skipped keys.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Record exercising every scalar kind and an integer sequence.
#[derive(Bind, Debug, Default, Clone, PartialEq)]
pub struct Params {
    #[bind(json = "q", xml = "q", form = "q")]
    pub query: String,
    #[bind(json = "int", xml = "int", form = "int")]
    pub int: i64,
    #[bind(http = "float", xml = "float", form = "float")]
    pub float: f64,
    #[bind(http = "bool", xml = "bool", form = "bool")]
    pub bool: bool,
    #[bind(http = "array", xml = "array", form = "array")]
    pub array: Vec<i64>,
    #[bind(json = "default", xml = "default", form = "default")]
    pub default: String,
}

impl Params {
    /// A record whose `default` field is pre-set.
    pub fn with_default(default: &str) -> Self {
        Self {
            default: default.to_string(),
            ..Self::default()
        }
    }

    /// The record the full `q/int/float/bool/array` fixture binds to.
    pub fn expected(query: &str, default: &str) -> Self {
        Self {
            query: query.to_string(),
            int: 233,
            float: 2.5,
            bool: true,
            array: vec![1, 2, 3],
            default: default.to_string(),
        }
    }
}

/// URL-encoded fixture without `default`.
pub const FIELDS: &str = "q=golang&int=233&float=2.5&bool=true&array=1&array=2&array=3";

/// Record receiving a text value and uploaded files.
#[derive(Bind, Debug, Default)]
pub struct Upload {
    #[bind(json = "hello")]
    pub val: String,
    pub q: String,
    pub file: Option<FilePart>,
    pub files: Vec<FilePart>,
}

/// The browser-style upload: `hello=world` and a 13-byte `hello.txt`.
pub fn upload_body() -> MultipartBody {
    MultipartBody::new()
        .text("hello", "world")
        .file("file", "hello.txt", "text/plain", "hello, world\n")
}
