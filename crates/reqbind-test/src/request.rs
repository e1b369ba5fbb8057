//! Test request building.

use crate::error::TestError;
use crate::multipart::MultipartBody;
use bytes::Bytes;
use http::{header, HeaderMap, HeaderName, HeaderValue, Method, Uri};
use reqbind_extract::BindRequest;
use serde::Serialize;

/// A fully built test request.
///
/// Convert it into a [`BindRequest`] to hand it to the binding entry points.
#[derive(Debug, Clone)]
pub struct TestRequest {
    /// HTTP method
    pub method: Method,
    /// Request URI
    pub uri: Uri,
    /// Request headers
    pub headers: HeaderMap,
    /// Request body
    pub body: Bytes,
}

impl TestRequest {
    /// Creates a new GET request.
    pub fn get(uri: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::GET, uri)
    }

    /// Creates a new POST request.
    pub fn post(uri: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::POST, uri)
    }

    /// Creates a new PUT request.
    pub fn put(uri: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::PUT, uri)
    }

    /// Creates a new PATCH request.
    pub fn patch(uri: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::PATCH, uri)
    }

    /// Creates a new DELETE request.
    pub fn delete(uri: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::DELETE, uri)
    }

    /// Creates a new HEAD request.
    pub fn head(uri: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::HEAD, uri)
    }

    /// Converts this request into the form the binding entry points accept.
    pub fn into_bind_request(self) -> BindRequest {
        BindRequest::new(self.method, self.uri, self.headers, self.body)
    }
}

impl From<TestRequest> for BindRequest {
    fn from(request: TestRequest) -> Self {
        request.into_bind_request()
    }
}

/// Builder for constructing test requests.
///
/// Encoding and header errors are held until [`build`](Self::build) so calls
/// can be chained without intermediate `Result`s. The first error wins.
#[must_use]
#[derive(Debug)]
pub struct TestRequestBuilder {
    method: Method,
    uri: String,
    query: Vec<String>,
    headers: HeaderMap,
    body: Option<Bytes>,
    error: Option<TestError>,
}

impl TestRequestBuilder {
    /// Creates a new request builder.
    pub fn new(method: Method, uri: impl AsRef<str>) -> Self {
        Self {
            method,
            uri: uri.as_ref().to_string(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
            error: None,
        }
    }

    fn fail(mut self, error: TestError) -> Self {
        self.error.get_or_insert(error);
        self
    }

    /// Appends a header to the request. Repeated names keep every value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use reqbind_test::TestRequest;
    ///
    /// let request = TestRequest::get("/search")
    ///     .header("X-Request-ID", "12345")
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(request.headers["x-request-id"], "12345");
    /// ```
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        let name = match HeaderName::try_from(name.as_ref()) {
            Ok(name) => name,
            Err(e) => return self.fail(TestError::InvalidHeader(e.to_string())),
        };
        let value = match HeaderValue::try_from(value.as_ref()) {
            Ok(value) => value,
            Err(e) => return self.fail(TestError::InvalidHeader(e.to_string())),
        };
        self.headers.append(name, value);
        self
    }

    /// Sets the Content-Type header, replacing any earlier value.
    pub fn content_type(mut self, content_type: impl AsRef<str>) -> Self {
        match HeaderValue::try_from(content_type.as_ref()) {
            Ok(value) => {
                self.headers.insert(header::CONTENT_TYPE, value);
                self
            }
            Err(e) => self.fail(TestError::InvalidHeader(e.to_string())),
        }
    }

    /// Appends a serialized value to the query string.
    ///
    /// Pairs already present in the URI come first.
    pub fn query<T: Serialize>(mut self, value: &T) -> Self {
        match serde_urlencoded::to_string(value) {
            Ok(encoded) => {
                if !encoded.is_empty() {
                    self.query.push(encoded);
                }
                self
            }
            Err(e) => self.fail(e.into()),
        }
    }

    /// Sets the raw request body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the request body as JSON.
    ///
    /// This also sets the `Content-Type` header to `application/json`.
    pub fn json<T: Serialize>(mut self, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(bytes) => {
                self.body = Some(Bytes::from(bytes));
                self.content_type("application/json")
            }
            Err(e) => self.fail(e.into()),
        }
    }

    /// Sets the request body as form-urlencoded.
    ///
    /// This also sets the `Content-Type` header to
    /// `application/x-www-form-urlencoded`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use reqbind_test::TestRequest;
    ///
    /// let request = TestRequest::post("/submit")
    ///     .form(&[("q", "golang"), ("array", "1"), ("array", "2")])
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(request.body.as_ref(), b"q=golang&array=1&array=2");
    /// ```
    pub fn form<T: Serialize>(mut self, value: &T) -> Self {
        match serde_urlencoded::to_string(value) {
            Ok(encoded) => {
                self.body = Some(Bytes::from(encoded));
                self.content_type("application/x-www-form-urlencoded")
            }
            Err(e) => self.fail(e.into()),
        }
    }

    /// Sets the request body to an encoded `multipart/form-data` message.
    ///
    /// This also sets the `Content-Type` header with the body's boundary.
    pub fn multipart(mut self, body: MultipartBody) -> Self {
        let content_type = body.content_type();
        self.body = Some(body.build());
        self.content_type(content_type)
    }

    /// Builds the test request.
    pub fn build(self) -> Result<TestRequest, TestError> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let uri = if self.query.is_empty() {
            self.uri
        } else {
            let separator = match self.uri.find('?') {
                Some(pos) if pos + 1 < self.uri.len() => "&",
                Some(_) => "",
                None => "?",
            };
            format!("{}{}{}", self.uri, separator, self.query.join("&"))
        };
        let uri: Uri = uri
            .parse()
            .map_err(|e| TestError::RequestBuild(format!("Invalid URI: {e}")))?;

        Ok(TestRequest {
            method: self.method,
            uri,
            headers: self.headers,
            body: self.body.unwrap_or_default(),
        })
    }

    /// Builds the request and converts it into a [`BindRequest`].
    pub fn into_bind_request(self) -> Result<BindRequest, TestError> {
        self.build().map(TestRequest::into_bind_request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use serde_json::json;

    #[test]
    fn test_get_request() {
        let request = TestRequest::get("/search").build().unwrap();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.uri.path(), "/search");
    }

    #[test]
    fn test_method_constructors() {
        let cases = [
            (TestRequest::post("/"), Method::POST),
            (TestRequest::put("/"), Method::PUT),
            (TestRequest::patch("/"), Method::PATCH),
            (TestRequest::delete("/"), Method::DELETE),
            (TestRequest::head("/"), Method::HEAD),
        ];

        for (builder, method) in cases {
            assert_eq!(builder.build().unwrap().method, method);
        }
    }

    #[test]
    fn test_header_appends() {
        let request = TestRequest::get("/")
            .header("X-Tag", "a")
            .header("X-Tag", "b")
            .build()
            .unwrap();

        let values: Vec<_> = request.headers.get_all("x-tag").iter().collect();
        assert_eq!(values, ["a", "b"]);
    }

    #[test]
    fn test_invalid_header_deferred_to_build() {
        let result = TestRequest::get("/")
            .header("bad header", "value")
            .header("X-Ok", "value")
            .build();

        assert!(matches!(result, Err(TestError::InvalidHeader(_))));
    }

    #[test]
    fn test_content_type_replaces() {
        let request = TestRequest::post("/")
            .content_type("text/plain")
            .content_type("application/xml")
            .build()
            .unwrap();

        assert_eq!(request.headers.get_all(header::CONTENT_TYPE).iter().count(), 1);
        assert_eq!(request.headers[header::CONTENT_TYPE], "application/xml");
    }

    #[test]
    fn test_query_serialization() {
        #[derive(Serialize)]
        struct Search<'a> {
            q: &'a str,
            int: i64,
        }

        let request = TestRequest::get("/search")
            .query(&Search { q: "go lang", int: 233 })
            .build()
            .unwrap();
        assert_eq!(request.uri.query(), Some("q=go+lang&int=233"));

        let request = TestRequest::get("/search?bool=true")
            .query(&[("float", "1.5")])
            .build()
            .unwrap();
        assert_eq!(request.uri.query(), Some("bool=true&float=1.5"));

        let request = TestRequest::get("/search?")
            .query(&[("q", "x")])
            .build()
            .unwrap();
        assert_eq!(request.uri.query(), Some("q=x"));
    }

    #[test]
    fn test_json_body() {
        let request = TestRequest::post("/users")
            .json(&json!({"q": "golang"}))
            .build()
            .unwrap();

        assert_eq!(request.headers[header::CONTENT_TYPE], "application/json");
        assert_eq!(request.body.as_ref(), b"{\"q\":\"golang\"}");
    }

    #[test]
    fn test_form_body() {
        let request = TestRequest::post("/submit")
            .form(&[("q", "hello world"), ("bool", "true")])
            .build()
            .unwrap();

        assert_eq!(
            request.headers[header::CONTENT_TYPE],
            "application/x-www-form-urlencoded"
        );
        assert_eq!(request.body.as_ref(), b"q=hello+world&bool=true");
    }

    #[test]
    fn test_form_rejects_nested_values() {
        let result = TestRequest::post("/submit")
            .form(&json!({"nested": {"a": 1}}))
            .build();

        assert!(matches!(result, Err(TestError::Form(_))));
    }

    #[test]
    fn test_invalid_uri() {
        let result = TestRequest::get("not a uri").build();
        assert!(matches!(result, Err(TestError::RequestBuild(_))));
    }

    #[test]
    fn test_into_bind_request() {
        let request = TestRequest::put("/items?id=7")
            .body("payload")
            .into_bind_request()
            .unwrap();

        assert_eq!(request.method(), &Method::PUT);
        assert_eq!(request.query_string(), Some("id=7"));
        assert_eq!(request.body().as_ref(), b"payload");
    }
}
