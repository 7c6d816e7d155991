use crate::error::ConfigError;

/// Resource limits enforced while parsing a multipart stream.
///
/// Every limit is disabled by default.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Limits {
    /// Maximum length in bytes of a single header line, excluding its CRLF.
    pub max_header_line_len: Option<usize>,
    /// Maximum number of header lines accepted per part.
    pub max_headers: Option<usize>,
    /// Maximum accepted `Content-Length` of a single part.
    pub max_content_length: Option<u64>,
}

impl Limits {
    /// Creates a permissive limits configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks that every configured limit is greater than zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_header_line_len == Some(0) {
            return Err(ConfigError::InvalidLimitValue {
                limit: "max_header_line_len",
            });
        }
        if self.max_headers == Some(0) {
            return Err(ConfigError::InvalidLimitValue {
                limit: "max_headers",
            });
        }
        if self.max_content_length == Some(0) {
            return Err(ConfigError::InvalidLimitValue {
                limit: "max_content_length",
            });
        }
        Ok(())
    }
}
