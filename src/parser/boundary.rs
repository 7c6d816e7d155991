use bytes::Bytes;

use crate::{config::BoundaryMode, error::ParseError};

const MULTIPART_PREFIX: &str = "multipart/";
const BOUNDARY_MARKER: &str = "; boundary=";

/// Extracts the boundary token from a `Content-Type` value.
///
/// The value must start with `multipart/` and contain `; boundary=`. The token is the
/// verbatim remainder of the string after that marker; see [`extract_boundary_with`]
/// for a mode that stops at the next parameter.
pub fn extract_boundary(content_type: &str) -> Result<String, ParseError> {
    extract_boundary_with(content_type, BoundaryMode::Verbatim)
}

/// Extracts the boundary token using an explicit [`BoundaryMode`].
pub fn extract_boundary_with(content_type: &str, mode: BoundaryMode) -> Result<String, ParseError> {
    let invalid = || ParseError::InvalidContentType {
        content_type: content_type.to_owned(),
    };

    let rest = content_type.strip_prefix(MULTIPART_PREFIX).ok_or_else(invalid)?;
    let marker = rest.find(BOUNDARY_MARKER).ok_or_else(invalid)?;
    let token = &rest[marker + BOUNDARY_MARKER.len()..];

    let token = match mode {
        BoundaryMode::Verbatim => token,
        BoundaryMode::TrimParameters => token
            .split_once(';')
            .map_or(token, |(head, _)| head)
            .trim_end_matches(|c: char| c.is_ascii_whitespace()),
    };

    if token.is_empty() {
        return Err(invalid());
    }

    Ok(token.to_owned())
}

/// Delimiter byte sequences derived from one boundary token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundary {
    token: String,
    part: Bytes,
    end: Bytes,
}

impl Boundary {
    /// Builds the part (`--token\r\n`) and end (`--token--`) delimiters for `token`.
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        let part = Bytes::from(format!("--{token}\r\n"));
        let end = Bytes::from(format!("--{token}--"));
        Self { token, part, end }
    }

    /// Parses a `Content-Type` value and derives the delimiters from its boundary.
    pub fn from_content_type(content_type: &str, mode: BoundaryMode) -> Result<Self, ParseError> {
        extract_boundary_with(content_type, mode).map(Self::new)
    }

    /// Returns the raw boundary token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the delimiter that opens a part.
    pub fn part_delimiter(&self) -> &[u8] {
        &self.part
    }

    /// Returns the delimiter that ends the part sequence.
    pub fn end_delimiter(&self) -> &[u8] {
        &self.end
    }
}
