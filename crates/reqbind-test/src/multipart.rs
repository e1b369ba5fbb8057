//! `multipart/form-data` body building.

use bytes::{BufMut, Bytes, BytesMut};

/// Boundary used when none is set explicitly.
pub const DEFAULT_BOUNDARY: &str = "----WebKitFormBoundarykhWusB7Rx4ybHQtA";

#[derive(Debug, Clone)]
enum Part {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        data: Bytes,
    },
}

/// Builder for an encoded `multipart/form-data` message.
///
/// Parts are written in the order they were added, separated by CRLF line
/// endings.
///
/// # Example
///
/// ```rust
/// use reqbind_test::MultipartBody;
///
/// let body = MultipartBody::new()
///     .boundary("XYZ")
///     .text("hello", "world")
///     .build();
///
/// assert_eq!(
///     body.as_ref(),
///     b"--XYZ\r\nContent-Disposition: form-data; name=\"hello\"\r\n\r\nworld\r\n--XYZ--\r\n"
/// );
/// ```
#[must_use]
#[derive(Debug, Clone)]
pub struct MultipartBody {
    boundary: String,
    parts: Vec<Part>,
}

impl Default for MultipartBody {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartBody {
    /// Creates an empty body with [`DEFAULT_BOUNDARY`].
    pub fn new() -> Self {
        Self {
            boundary: DEFAULT_BOUNDARY.to_string(),
            parts: Vec::new(),
        }
    }

    /// Sets the boundary.
    pub fn boundary(mut self, boundary: impl Into<String>) -> Self {
        self.boundary = boundary.into();
        self
    }

    /// Adds a plain value part.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(Part::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Adds a file part.
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        self.parts.push(Part::File {
            name: name.into(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            data: data.into(),
        });
        self
    }

    /// Returns the `Content-Type` header value for this body.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Encodes the message.
    pub fn build(self) -> Bytes {
        let mut buf = BytesMut::new();

        for part in &self.parts {
            buf.put_slice(b"--");
            buf.put_slice(self.boundary.as_bytes());
            buf.put_slice(b"\r\n");

            match part {
                Part::Text { name, value } => {
                    put_line(
                        &mut buf,
                        &format!("Content-Disposition: form-data; name=\"{name}\""),
                    );
                    buf.put_slice(b"\r\n");
                    buf.put_slice(value.as_bytes());
                }
                Part::File {
                    name,
                    file_name,
                    content_type,
                    data,
                } => {
                    put_line(
                        &mut buf,
                        &format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\""
                        ),
                    );
                    put_line(&mut buf, &format!("Content-Type: {content_type}"));
                    buf.put_slice(b"\r\n");
                    buf.put_slice(data);
                }
            }
            buf.put_slice(b"\r\n");
        }

        buf.put_slice(b"--");
        buf.put_slice(self.boundary.as_bytes());
        buf.put_slice(b"--\r\n");
        buf.freeze()
    }
}

fn put_line(buf: &mut BytesMut, line: &str) {
    buf.put_slice(line.as_bytes());
    buf.put_slice(b"\r\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqbind_core::BindConfig;
    use reqbind_extract::parse_multipart;

    #[test]
    fn test_content_type() {
        let body = MultipartBody::new();
        assert_eq!(
            body.content_type(),
            "multipart/form-data; boundary=----WebKitFormBoundarykhWusB7Rx4ybHQtA"
        );
    }

    #[test]
    fn test_file_part_encoding() {
        let body = MultipartBody::new()
            .boundary("B")
            .file("file", "hello.txt", "text/plain", "Hello, World!")
            .build();

        let expected = "--B\r\n\
            Content-Disposition: form-data; name=\"file\"; filename=\"hello.txt\"\r\n\
            Content-Type: text/plain\r\n\
            \r\n\
            Hello, World!\r\n\
            --B--\r\n";
        assert_eq!(body.as_ref(), expected.as_bytes());
    }

    #[test]
    fn test_empty_body() {
        let body = MultipartBody::new().boundary("B").build();
        assert_eq!(body.as_ref(), b"--B--\r\n");
    }

    #[tokio::test]
    async fn test_body_parses_back() {
        let body = MultipartBody::new()
            .text("hello", "world")
            .text("hello", "again")
            .file("file", "hello.txt", "text/plain", "Hello, World!");

        let mut headers = http::HeaderMap::new();
        headers.insert(
            http::header::CONTENT_TYPE,
            body.content_type().parse().unwrap(),
        );
        let form = parse_multipart(&headers, &body.build(), &BindConfig::default())
            .await
            .unwrap();

        assert_eq!(form.values.get_all("hello"), ["world", "again"]);
        let file = &form.files.get_all("file")[0];
        assert_eq!(file.file_name(), Some("hello.txt"));
        assert_eq!(file.size(), 13);
    }
}
