//! Writer for the length-delimited multipart wire format.

use bytes::{BufMut, Bytes, BytesMut};

use crate::parser::headers::HeaderSet;

/// Encodes parts that [`Multipart`](crate::Multipart) can read back.
///
/// # Examples
///
/// ```
/// use multipart_feed::{HeaderSet, PartEncoder};
///
/// let encoder = PartEncoder::new("frame");
/// let headers: HeaderSet = [("Content-Type", "image/jpeg")].into_iter().collect();
///
/// let part = encoder.encode_part(&headers, b"jpeg");
/// assert_eq!(
///     &part[..],
///     b"--frame\r\nContent-Type: image/jpeg\r\nContent-Length: 4\r\n\r\njpeg\r\n"
/// );
/// assert_eq!(&encoder.finish()[..], b"--frame--\r\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartEncoder {
    boundary: String,
}

impl PartEncoder {
    /// Creates an encoder for `boundary`.
    pub fn new(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
        }
    }

    /// Returns the boundary token.
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Renders `multipart/<subtype>; boundary=<token>`.
    pub fn content_type(&self, subtype: &str) -> String {
        format!("multipart/{subtype}; boundary={}", self.boundary)
    }

    /// Encodes one part: delimiter, headers, blank line, body and a trailing CRLF.
    ///
    /// A `Content-Length` header matching `body` is appended when `headers` has none.
    pub fn encode_part(&self, headers: &HeaderSet, body: &[u8]) -> Bytes {
        let mut out = BytesMut::with_capacity(self.boundary.len() + body.len() + 64);
        out.put_slice(b"--");
        out.put_slice(self.boundary.as_bytes());
        out.put_slice(b"\r\n");

        for (name, value) in headers.iter() {
            put_header(&mut out, name, value);
        }
        if !headers.contains("Content-Length") {
            put_header(&mut out, "Content-Length", &body.len().to_string());
        }

        out.put_slice(b"\r\n");
        out.put_slice(body);
        out.put_slice(b"\r\n");
        out.freeze()
    }

    /// Encodes the end delimiter followed by CRLF.
    pub fn finish(&self) -> Bytes {
        Bytes::from(format!("--{}--\r\n", self.boundary))
    }
}

fn put_header(out: &mut BytesMut, name: &str, value: &str) {
    out.put_slice(name.as_bytes());
    out.put_slice(b": ");
    out.put_slice(value.as_bytes());
    out.put_slice(b"\r\n");
}
