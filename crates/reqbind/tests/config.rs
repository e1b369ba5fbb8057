//! Integration tests for configuration driving the entry points.

mod common;

use std::io::Write;

use common::Params;
use reqbind::{unmarshal_with, BindConfig, ConfigError};
use reqbind_test::TestRequest;
use tempfile::NamedTempFile;

#[tokio::test]
async fn test_config_file_selects_tag_keys() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
tag_key = "form"
json_tag_key = "http"
"#
    )
    .unwrap();
    let config = BindConfig::from_file(file.path()).unwrap();
    assert_eq!(config.xml_tag_key, "xml");

    // "float" is only tagged under `http`; "int" falls back to its identifier.
    let req = TestRequest::post("/")
        .content_type("application/json")
        .body(r#"{"float": 2.5, "int": 233, "q": "default name is query"}"#)
        .into_bind_request()
        .unwrap();
    let mut params = Params::default();
    unmarshal_with(&req, &mut params, &config).await.unwrap();

    assert!((params.float - 2.5).abs() < f64::EPSILON);
    assert_eq!(params.int, 233);
    assert_eq!(params.query, "");

    let req = TestRequest::get("/?q=golang").into_bind_request().unwrap();
    let mut params = Params::default();
    unmarshal_with(&req, &mut params, &config).await.unwrap();

    assert_eq!(params.query, "golang");
}

#[tokio::test]
async fn test_env_overrides_memory_threshold() {
    std::env::set_var("REQBIND_IT_MULTIPART_MAX_MEMORY", "4");
    let config = BindConfig::default()
        .with_env_prefix("reqbind_it")
        .unwrap();
    std::env::remove_var("REQBIND_IT_MULTIPART_MAX_MEMORY");
    assert_eq!(config.multipart_max_memory, 4);

    let req = TestRequest::post("/")
        .multipart(common::upload_body())
        .into_bind_request()
        .unwrap();
    let mut upload = common::Upload::default();
    unmarshal_with(&req, &mut upload, &config).await.unwrap();

    let file = upload.file.unwrap();
    assert!(!file.is_in_memory());
    assert_eq!(file.size(), 13);
}

#[test]
fn test_invalid_config_rejected() {
    let err = BindConfig::from_toml_str("multipart_max_memory = 0").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(_)));

    let err = BindConfig::from_toml_str("tag = \"json\"").unwrap_err();
    assert!(matches!(err, ConfigError::TomlError(_)));
}
