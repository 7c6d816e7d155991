use http::{HeaderMap, HeaderName, HeaderValue};

use crate::error::ParseError;

const CONTENT_LENGTH: &str = "Content-Length";

/// Insertion-ordered, multi-valued part headers.
///
/// Names keep the spelling they arrived with; lookups compare names ASCII
/// case-insensitively. Repeated names accumulate instead of overwriting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    entries: Vec<(String, String)>,
}

impl HeaderSet {
    /// Creates an empty header set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a header, keeping any earlier values for the same name.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Returns the first value for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns every value for `name`, in arrival order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns `true` when at least one value exists for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates over `(name, value)` pairs in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Returns the number of header lines.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no headers are present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Converts into an [`http::HeaderMap`], keeping per-name value order.
    pub fn to_header_map(&self) -> Result<HeaderMap, http::Error> {
        let mut headers = HeaderMap::with_capacity(self.entries.len());
        for (name, value) in &self.entries {
            let name = HeaderName::from_bytes(name.as_bytes())?;
            let value = HeaderValue::from_str(value)?;
            headers.append(name, value);
        }
        Ok(headers)
    }
}

impl<N, V> FromIterator<(N, V)> for HeaderSet
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.append(name, value);
        }
        headers
    }
}

/// Splits one header line (without its CRLF) into name and value.
///
/// The first colon ends the name and must be followed by a single space; the value is
/// the rest of the line, untrimmed.
pub fn parse_header_line(line: &str) -> Result<(&str, &str), ParseError> {
    let (name, rest) = line.split_once(':').ok_or(ParseError::MalformedHeaderLine {
        reason: "missing `:` after header name",
    })?;

    let value = rest.strip_prefix(' ').ok_or(ParseError::MalformedHeaderLine {
        reason: "header name must be followed by `: `",
    })?;

    Ok((name, value))
}

/// Reads the part body length from the first `Content-Length` header.
pub fn parse_content_length(headers: &HeaderSet) -> Result<u64, ParseError> {
    let raw = headers
        .get(CONTENT_LENGTH)
        .ok_or(ParseError::InvalidContentLength { value: None })?;

    let digits = raw.trim_matches(|c: char| c.is_ascii_whitespace());
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidContentLength {
            value: Some(raw.to_owned()),
        });
    }

    digits
        .parse::<u64>()
        .map_err(|_| ParseError::InvalidContentLength {
            value: Some(raw.to_owned()),
        })
}
