//! Binding entry points.
//!
//! [`unmarshal`] picks the decoding strategy from the request's method and
//! content type. [`unpack_with`] binds from an explicitly chosen [`Source`].

use std::fmt;

use http::Method;
use reqbind_core::{bind, Bind, BindConfig};
use tracing::debug;

use crate::form::{body_values, is_urlencoded, query_values};
use crate::multipart::parse_multipart;
use crate::structured::{bind_json, bind_xml};
use crate::{BindRequest, ExtractionError};

/// Media type assumed for requests without a Content-Type header.
const DEFAULT_MEDIA_TYPE: &str = "application/octet-stream";

/// Where [`unpack_with`] reads values from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Source {
    /// URL-encoded body of a `POST`, `PUT` or `PATCH` request.
    #[default]
    Body,
    /// URL query only.
    Query,
    /// Multipart values and files.
    Multipart,
    /// Body, then query. Query values win for scalar fields.
    Merged,
    /// Multipart values then query, then multipart files. Query values win
    /// for scalar fields.
    MergedMultipart,
}

impl Source {
    /// Returns true if the source reads a multipart body.
    #[must_use]
    pub const fn is_multipart(self) -> bool {
        matches!(self, Self::Multipart | Self::MergedMultipart)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Body => write!(f, "body"),
            Self::Query => write!(f, "query"),
            Self::Multipart => write!(f, "multipart"),
            Self::Merged => write!(f, "merged"),
            Self::MergedMultipart => write!(f, "merged-multipart"),
        }
    }
}

/// Binds the URL-encoded body of `req` into `record` with the default config.
///
/// # Errors
///
/// See [`unpack_with`].
pub async fn unpack<T: Bind>(req: &BindRequest, record: &mut T) -> Result<(), ExtractionError> {
    unpack_with(req, record, Source::Body, &BindConfig::default()).await
}

/// Binds values from `source` into `record`.
///
/// Field names are resolved under `config.tag_key`.
///
/// # Errors
///
/// Returns `ExtractionError::NotMultipart` when a multipart source is asked
/// of a non-multipart request, a decoding error for malformed data, or
/// `ExtractionError::Bind` for the first value that fails to coerce. Fields
/// bound before a failure keep their new values.
pub async fn unpack_with<T: Bind>(
    req: &BindRequest,
    record: &mut T,
    source: Source,
    config: &BindConfig,
) -> Result<(), ExtractionError> {
    debug!(method = %req.method(), %source, "binding request");

    match source {
        Source::Query => bind(record, &query_values(req)?, None, config)?,
        Source::Body => bind(record, &body_values(req)?, None, config)?,
        Source::Merged => {
            let mut values = body_values(req)?;
            values.merge(query_values(req)?);
            bind(record, &values, None, config)?;
        }
        Source::Multipart | Source::MergedMultipart => {
            let mut form = parse_multipart(req.headers(), req.body(), config).await?;
            if source == Source::MergedMultipart {
                form.values.merge(query_values(req)?);
            }
            bind(record, &form.values, Some(&form.files), config)?;
        }
    }
    Ok(())
}

/// Binds `req` into `record` according to its method and content type, with
/// the default config.
///
/// # Errors
///
/// See [`unmarshal_with`].
pub async fn unmarshal<T: Bind>(req: &BindRequest, record: &mut T) -> Result<(), ExtractionError> {
    unmarshal_with(req, record, &BindConfig::default()).await
}

/// Binds `req` into `record` according to its method and content type.
///
/// `GET`, `DELETE`, `HEAD` and `TRACE` requests bind their URL query only.
/// Other requests are decoded by media type:
///
/// | Media type | Strategy | Tag key |
/// |---|---|---|
/// | `application/x-www-form-urlencoded` | URL-encoded body, query not merged | `tag_key` |
/// | `multipart/form-data` | multipart values, then files | `tag_key` |
/// | `application/json` | members of the root object | `json_tag_key` |
/// | `application/xml` | children of the root element | `xml_tag_key` |
///
/// Media type parameters, including `charset`, are ignored and the body is
/// read as UTF-8. A missing or empty Content-Type is treated as
/// `application/octet-stream`, which is unsupported.
///
/// # Errors
///
/// - `ExtractionError::MediaType` if the Content-Type cannot be parsed
/// - `ExtractionError::UnsupportedMediaType` for any other media type
/// - `ExtractionError::Body` wrapping any failure while decoding or binding
///   the body
pub async fn unmarshal_with<T: Bind>(
    req: &BindRequest,
    record: &mut T,
    config: &BindConfig,
) -> Result<(), ExtractionError> {
    if is_bodiless(req.method()) {
        debug!(method = %req.method(), "binding url query");
        return unpack_with(req, record, Source::Query, config).await;
    }

    let content_type = req
        .content_type()
        .filter(|ct| !ct.is_empty())
        .unwrap_or(DEFAULT_MEDIA_TYPE);
    let media_type: mime::Mime = content_type.parse().map_err(ExtractionError::MediaType)?;
    let essence = media_type.essence_str();
    debug!(method = %req.method(), media_type = essence, "binding request body");

    let result = if media_type.type_() == mime::APPLICATION && media_type.subtype() == mime::JSON {
        bind_json(req.body(), record, &config.json_tag_key)
    } else if media_type.type_() == mime::APPLICATION && media_type.subtype() == mime::XML {
        bind_xml(req.body(), record, &config.xml_tag_key)
    } else if media_type.type_() == mime::MULTIPART && media_type.subtype() == mime::FORM_DATA {
        unpack_with(req, record, Source::Multipart, config).await
    } else if is_urlencoded(&media_type) {
        unpack_with(req, record, Source::Body, config).await
    } else {
        return Err(ExtractionError::UnsupportedMediaType(content_type.to_string()));
    };

    result.map_err(|e| e.in_body(essence))
}

fn is_bodiless(method: &Method) -> bool {
    [Method::GET, Method::DELETE, Method::HEAD, Method::TRACE].contains(method)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Uri;
    use reqbind_core::{FieldDescriptor, FieldType, FilePart, Kind, Slot};

    #[derive(Debug, Default)]
    struct Params {
        q: String,
        array: Vec<i64>,
        default: String,
        file: Option<FilePart>,
    }

    impl Bind for Params {
        fn descriptors() -> &'static [FieldDescriptor<Self>] {
            const FIELDS: &[FieldDescriptor<Params>] = &[
                FieldDescriptor::new("Q", &[("json", "q")], FieldType::Scalar(Kind::Text), {
                    fn slot(p: &mut Params) -> Slot<'_> {
                        Slot::Text(&mut p.q)
                    }
                    slot
                }),
                FieldDescriptor::new("Array", &[], FieldType::Sequence(Kind::Integer), {
                    fn slot(p: &mut Params) -> Slot<'_> {
                        Slot::IntegerList(&mut p.array)
                    }
                    slot
                }),
                FieldDescriptor::new("Default", &[], FieldType::Scalar(Kind::Text), {
                    fn slot(p: &mut Params) -> Slot<'_> {
                        Slot::Text(&mut p.default)
                    }
                    slot
                }),
                FieldDescriptor::new("File", &[], FieldType::Scalar(Kind::File), {
                    fn slot(p: &mut Params) -> Slot<'_> {
                        Slot::File(&mut p.file)
                    }
                    slot
                }),
            ];
            FIELDS
        }
    }

    fn request(method: Method, uri: &'static str, content_type: Option<&str>, body: &'static str) -> BindRequest {
        let mut builder = BindRequest::builder()
            .method(method)
            .uri(Uri::from_static(uri))
            .body(body);
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        builder.build()
    }

    const FORM: Option<&str> = Some("application/x-www-form-urlencoded");

    #[tokio::test]
    async fn test_get_binds_query_only() {
        let req = request(Method::GET, "/?q=golang&array=1&array=2", FORM, "q=body");
        let mut params = Params::default();

        unmarshal(&req, &mut params).await.unwrap();
        assert_eq!(params.q, "golang");
        assert_eq!(params.array, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_bodiless_methods_ignore_content_type() {
        for method in [Method::DELETE, Method::HEAD, Method::TRACE] {
            let req = request(method, "/?q=x", Some("application/javascript"), "");
            let mut params = Params::default();
            unmarshal(&req, &mut params).await.unwrap();
            assert_eq!(params.q, "x");
        }
    }

    #[tokio::test]
    async fn test_urlencoded_body_does_not_merge_query() {
        let req = request(Method::POST, "/?q=rust&default=888", FORM, "q=golang");
        let mut params = Params {
            default: "2333".to_string(),
            ..Params::default()
        };

        unmarshal(&req, &mut params).await.unwrap();
        assert_eq!(params.q, "golang");
        assert_eq!(params.default, "2333");
    }

    #[tokio::test]
    async fn test_merged_query_wins() {
        let req = request(Method::POST, "/?default=888", FORM, "default=999&array=1");
        let mut params = Params::default();

        unpack_with(&req, &mut params, Source::Merged, &BindConfig::default())
            .await
            .unwrap();
        assert_eq!(params.default, "888");
        assert_eq!(params.array, vec![1]);
    }

    #[tokio::test]
    async fn test_body_source_on_get_is_empty() {
        let req = request(Method::GET, "/?q=x", FORM, "q=y");
        let mut params = Params::default();

        unpack(&req, &mut params).await.unwrap();
        assert_eq!(params.q, "");
    }

    #[test]
    fn test_source_display() {
        assert_eq!(Source::default(), Source::Body);
        assert_eq!(Source::MergedMultipart.to_string(), "merged-multipart");
        assert!(Source::Multipart.is_multipart());
        assert!(!Source::Merged.is_multipart());
    }

    #[tokio::test]
    async fn test_multipart_source_requires_multipart() {
        let req = request(Method::POST, "/", FORM, "q=x");
        let mut params = Params::default();

        let err = unpack_with(&req, &mut params, Source::Multipart, &BindConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::NotMultipart));
    }

    #[tokio::test]
    async fn test_unsupported_content_types() {
        for content_type in [Some("image/vnd.tencent.tap"), Some("application/javascript"), None] {
            let req = request(Method::POST, "/", content_type, "...");
            let mut params = Params::default();

            let err = unmarshal(&req, &mut params).await.unwrap_err();
            let expected = content_type.unwrap_or("application/octet-stream");
            assert_eq!(err.to_string(), format!("unsupported content type: {expected}"));
        }
    }

    #[tokio::test]
    async fn test_empty_content_type_is_octet_stream() {
        let req = request(Method::POST, "/", Some(""), "...");
        let mut params = Params::default();

        let err = unmarshal(&req, &mut params).await.unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedMediaType(_)));
        assert_eq!(err.to_string(), "unsupported content type: application/octet-stream");
    }

    #[tokio::test]
    async fn test_unsupported_reports_literal_header() {
        let req = request(Method::PUT, "/", Some("text/plain; charset=utf-8"), "");
        let mut params = Params::default();

        let err = unmarshal(&req, &mut params).await.unwrap_err();
        assert_eq!(err.to_string(), "unsupported content type: text/plain; charset=utf-8");
    }

    #[tokio::test]
    async fn test_malformed_media_type() {
        let req = request(Method::POST, "/", Some("json"), "{}");
        let mut params = Params::default();

        let err = unmarshal(&req, &mut params).await.unwrap_err();
        assert!(err.to_string().starts_with("parse request media type: "));
    }

    #[tokio::test]
    async fn test_json_body_with_charset() {
        let req = request(
            Method::POST,
            "/?q=query",
            Some("application/json; charset=gbk"),
            r#"{"q": "ÄãºÃ, hello"}"#,
        );
        let mut params = Params::default();

        unmarshal(&req, &mut params).await.unwrap();
        assert_eq!(params.q, "ÄãºÃ, hello");
        assert_eq!(req.body().len(), r#"{"q": "ÄãºÃ, hello"}"#.len());
    }

    #[tokio::test]
    async fn test_body_errors_are_wrapped() {
        let req = request(Method::PATCH, "/", FORM, "array=x");
        let mut params = Params::default();

        let err = unmarshal(&req, &mut params).await.unwrap_err();
        assert!(err
            .to_string()
            .starts_with("parse request body as application/x-www-form-urlencoded: array: "));
        assert_eq!(err.bind_error().map(|e| e.name()), Some("array"));
    }

    #[tokio::test]
    async fn test_json_syntax_error_wrapped() {
        let req = request(Method::POST, "/", Some("application/json"), "{");
        let mut params = Params::default();

        let err = unmarshal(&req, &mut params).await.unwrap_err();
        assert!(err.to_string().starts_with("parse request body as application/json: "));
        assert!(matches!(err.root(), ExtractionError::Json(_)));
    }

    #[tokio::test]
    async fn test_custom_tag_key() {
        let req = request(Method::GET, "/?Q=upper&q=lower", None, "");
        let config = BindConfig::default().with_tag_key("form");
        let mut params = Params::default();

        unmarshal_with(&req, &mut params, &config).await.unwrap();
        assert_eq!(params.q, "lower");
    }
}
