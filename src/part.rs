use bytes::Bytes;

use crate::parser::headers::HeaderSet;

/// One complete part of a multipart stream.
///
/// The body is an immutable [`Bytes`] view that stays valid after the parser moves on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    headers: HeaderSet,
    body: Bytes,
}

impl Part {
    /// Creates a part from its headers and body.
    pub fn new(headers: HeaderSet, body: Bytes) -> Self {
        Self { headers, body }
    }

    /// Returns the part headers in arrival order.
    pub fn headers(&self) -> &HeaderSet {
        &self.headers
    }

    /// Returns the first value of header `name`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Returns every value of header `name`.
    pub fn header_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers.get_all(name)
    }

    /// Returns the raw body bytes.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns the body length in bytes.
    pub fn content_length(&self) -> usize {
        self.body.len()
    }

    /// Parses the part `Content-Type` header, if present and well formed.
    pub fn content_type(&self) -> Option<mime::Mime> {
        self.header("Content-Type")
            .and_then(|value| value.parse::<mime::Mime>().ok())
    }

    /// Views the body as UTF-8 text.
    pub fn text(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.body)
    }

    /// Converts the headers into an [`http::HeaderMap`].
    pub fn to_header_map(&self) -> Result<http::HeaderMap, http::Error> {
        self.headers.to_header_map()
    }

    /// Splits the part into headers and body.
    pub fn into_parts(self) -> (HeaderSet, Bytes) {
        (self.headers, self.body)
    }

    /// Consumes the part and returns its body.
    pub fn into_body(self) -> Bytes {
        self.body
    }
}
