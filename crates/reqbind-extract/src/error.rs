//! Extraction error types.
//!
//! Every failure of a binding entry point is reported as one
//! [`ExtractionError`], whatever stage it came from. Failures while decoding
//! a body selected by content type are wrapped in [`ExtractionError::Body`],
//! which names the media type that was being parsed.

use http::StatusCode;
use reqbind_core::BindError;
use thiserror::Error;

/// Error returned by the binding entry points.
///
/// Can be converted to an appropriate HTTP status code for error responses.
///
/// # Example
///
/// ```rust
/// use reqbind_extract::ExtractionError;
/// use http::StatusCode;
///
/// let err = ExtractionError::UnsupportedMediaType("application/javascript".to_string());
/// assert_eq!(err.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
/// assert_eq!(err.to_string(), "unsupported content type: application/javascript");
/// ```
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The Content-Type header is not a valid media type.
    #[error("parse request media type: {0}")]
    MediaType(#[source] mime::FromStrError),

    /// The media type has no decoding strategy. Carries the literal header.
    #[error("unsupported content type: {0}")]
    UnsupportedMediaType(String),

    /// A multipart source was requested for a request that is not multipart.
    #[error("request Content-Type isn't multipart/form-data")]
    NotMultipart,

    /// The multipart body is malformed.
    #[error(transparent)]
    Multipart(#[from] multer::Error),

    /// Multipart text values exceed the memory limit.
    #[error("multipart: message too large")]
    MultipartTooLarge,

    /// A multipart text value is not valid UTF-8.
    #[error("multipart value {name}: {source}")]
    InvalidUtf8 {
        /// The part's field name.
        name: String,
        /// The decoding failure.
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Spilling a file part to disk failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The URL-encoded data is malformed.
    #[error(transparent)]
    Form(#[from] serde_urlencoded::de::Error),

    /// The JSON body is malformed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The XML body is malformed.
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),

    /// A structured body's top level is not an object or element.
    #[error("document root is not an object")]
    NotAnObject,

    /// A value could not be coerced into its field.
    #[error(transparent)]
    Bind(#[from] BindError),

    /// Decoding a body selected by content type failed.
    #[error("parse request body as {media_type}: {source}")]
    Body {
        /// The media type essence, e.g. `application/json`.
        media_type: String,
        /// The underlying failure.
        #[source]
        source: Box<ExtractionError>,
    },
}

impl ExtractionError {
    /// Wraps `self` as a failure to decode a body of `media_type`.
    #[must_use]
    pub fn in_body(self, media_type: impl Into<String>) -> Self {
        Self::Body {
            media_type: media_type.into(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, looking through [`ExtractionError::Body`].
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::Body { source, .. } => source.root(),
            other => other,
        }
    }

    /// Returns the field binding failure, if that is what went wrong.
    #[must_use]
    pub fn bind_error(&self) -> Option<&BindError> {
        match self.root() {
            Self::Bind(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the appropriate HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self.root() {
            Self::MediaType(_) | Self::UnsupportedMediaType(_) | Self::NotMultipart => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            Self::MultipartTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Multipart(err) => match err {
                multer::Error::FieldSizeExceeded { .. } | multer::Error::StreamSizeExceeded { .. } => {
                    StatusCode::PAYLOAD_TOO_LARGE
                }
                _ => StatusCode::BAD_REQUEST,
            },
            Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidUtf8 { .. }
            | Self::Form(_)
            | Self::Json(_)
            | Self::Xml(_)
            | Self::NotAnObject
            | Self::Bind(_)
            | Self::Body { .. } => StatusCode::BAD_REQUEST,
        }
    }

    /// Returns the error code suitable for error envelopes.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self.root() {
            Self::MediaType(_) => "INVALID_CONTENT_TYPE",
            Self::UnsupportedMediaType(_) | Self::NotMultipart => "UNSUPPORTED_MEDIA_TYPE",
            Self::MultipartTooLarge => "PAYLOAD_TOO_LARGE",
            Self::Io(_) => "EXTRACTION_FAILED",
            Self::Bind(_) => "INVALID_PARAMETER",
            Self::Multipart(_)
            | Self::InvalidUtf8 { .. }
            | Self::Form(_)
            | Self::Json(_)
            | Self::Xml(_)
            | Self::NotAnObject
            | Self::Body { .. } => "DESERIALIZATION_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqbind_core::CoerceError;

    #[test]
    fn test_unsupported_media_type_error() {
        let err = ExtractionError::UnsupportedMediaType("image/vnd.tencent.tap".to_string());

        assert_eq!(err.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(err.error_code(), "UNSUPPORTED_MEDIA_TYPE");
        assert_eq!(err.to_string(), "unsupported content type: image/vnd.tencent.tap");
    }

    #[test]
    fn test_media_type_error() {
        let cause = "not a media type".parse::<mime::Mime>().unwrap_err();
        let err = ExtractionError::MediaType(cause);

        assert!(err.to_string().starts_with("parse request media type: "));
        assert_eq!(err.error_code(), "INVALID_CONTENT_TYPE");
    }

    #[test]
    fn test_body_wrapper() {
        let bind = BindError::new("int", CoerceError::Boolean("x".to_string()));
        let err = ExtractionError::from(bind).in_body("application/x-www-form-urlencoded");

        assert_eq!(
            err.to_string(),
            "parse request body as application/x-www-form-urlencoded: int: invalid boolean syntax: \"x\""
        );
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "INVALID_PARAMETER");
        assert_eq!(err.bind_error().map(BindError::name), Some("int"));
    }

    #[test]
    fn test_too_large() {
        let err = ExtractionError::MultipartTooLarge.in_body("multipart/form-data");

        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(matches!(err.root(), ExtractionError::MultipartTooLarge));
        assert!(err.to_string().ends_with("multipart: message too large"));
    }

    #[test]
    fn test_not_multipart() {
        let err = ExtractionError::NotMultipart;
        assert_eq!(err.to_string(), "request Content-Type isn't multipart/form-data");
        assert!(err.bind_error().is_none());
    }
}
