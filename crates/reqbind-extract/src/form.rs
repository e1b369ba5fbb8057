//! URL query and URL-encoded body sources.
//!
//! Both decode `application/x-www-form-urlencoded` syntax into an ordered
//! [`ValueSource`]: `+` becomes a space, percent escapes are decoded, and
//! repeated keys keep every value in order.

use http::{header, Method};
use reqbind_core::ValueSource;
use tracing::trace;

use crate::{BindRequest, ExtractionError};

/// Decodes URL-encoded bytes into a value source.
///
/// # Example
///
/// ```rust
/// use reqbind_extract::parse_urlencoded;
///
/// let values = parse_urlencoded(b"array=1&q=hello+world&array=2").unwrap();
///
/// assert_eq!(values.get_all("array"), ["1", "2"]);
/// assert_eq!(values.get("q").map(String::as_str), Some("hello world"));
/// ```
pub fn parse_urlencoded(input: &[u8]) -> Result<ValueSource, ExtractionError> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(input)?;
    Ok(pairs.into_iter().collect())
}

/// Decodes the request's URL query. A missing query yields an empty source.
pub fn query_values(req: &BindRequest) -> Result<ValueSource, ExtractionError> {
    let query = req.query_string().unwrap_or_default();
    trace!(query, "parsing url query");
    parse_urlencoded(query.as_bytes())
}

/// Decodes the request body as URL-encoded form data.
///
/// Only `POST`, `PUT` and `PATCH` requests declaring
/// `application/x-www-form-urlencoded` have a form body; every other request
/// yields an empty source.
///
/// # Errors
///
/// Returns `ExtractionError::MediaType` if the Content-Type header of a body
/// method cannot be parsed, or `ExtractionError::Form` on malformed data.
pub fn body_values(req: &BindRequest) -> Result<ValueSource, ExtractionError> {
    if !has_body_method(req.method()) {
        return Ok(ValueSource::new());
    }

    let Some(content_type) = req.header(header::CONTENT_TYPE.as_str()) else {
        return Ok(ValueSource::new());
    };
    let media_type: mime::Mime = content_type.parse().map_err(ExtractionError::MediaType)?;
    if !is_urlencoded(&media_type) {
        trace!(%media_type, "request body is not url-encoded");
        return Ok(ValueSource::new());
    }

    parse_urlencoded(req.body())
}

/// Returns true for `application/x-www-form-urlencoded`, ignoring parameters.
pub(crate) fn is_urlencoded(media_type: &mime::Mime) -> bool {
    media_type.type_() == mime::APPLICATION && media_type.subtype() == mime::WWW_FORM_URLENCODED
}

fn has_body_method(method: &Method) -> bool {
    method == Method::POST || method == Method::PUT || method == Method::PATCH
}
