use thiserror::Error;

/// Boxed error type carried by transport failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Configuration-time validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A configured numeric limit must be strictly greater than zero.
    #[error("limit `{limit}` must be greater than 0")]
    InvalidLimitValue {
        /// Name of the limit.
        limit: &'static str,
    },
}

/// Fatal multipart framing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The content type is not `multipart/*` or carries no usable boundary.
    #[error("invalid multipart Content-Type `{content_type}`")]
    InvalidContentType {
        /// The rejected content type value.
        content_type: String,
    },
    /// Bytes at a boundary position matched neither the part nor the end boundary.
    #[error("malformed multipart boundary")]
    MalformedBoundary,
    /// A part header line is not `Name: value` terminated by CRLF.
    #[error("malformed part header line: {reason}")]
    MalformedHeaderLine {
        /// What was wrong with the line.
        reason: &'static str,
    },
    /// The part has no usable `Content-Length` header.
    #[error("{}", describe_content_length(.value))]
    InvalidContentLength {
        /// Raw header value, when the header was present.
        value: Option<String>,
    },
    /// The source ended in the middle of a part or with trailing garbage.
    #[error("multipart stream ended unexpectedly")]
    TruncatedStream,
}

fn describe_content_length(value: &Option<String>) -> String {
    match value {
        Some(value) => format!("invalid part Content-Length `{value}`"),
        None => "missing part Content-Length header".to_owned(),
    }
}

/// Runtime error type used by `multipart-feed`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MultipartError {
    /// Configuration error surfaced at runtime.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Multipart framing failure.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The chunk source failed to produce data.
    #[error("chunk source failed: {0}")]
    Source(#[source] BoxError),
    /// A header line exceeded the configured length limit.
    #[error("part header line exceeded max length of {max} bytes")]
    HeaderLineTooLong {
        /// Maximum accepted header line length in bytes.
        max: usize,
    },
    /// A part carried more header lines than the configured limit.
    #[error("part exceeded max header count of {max}")]
    TooManyHeaders {
        /// Maximum accepted number of header lines per part.
        max: usize,
    },
    /// A part declared a body larger than the configured limit.
    #[error("part Content-Length {length} exceeded max of {max} bytes")]
    ContentLengthTooLarge {
        /// Declared body length.
        length: u64,
        /// Maximum accepted body length in bytes.
        max: u64,
    },
}

impl MultipartError {
    /// Wraps a transport failure.
    pub fn source_error(err: impl Into<BoxError>) -> Self {
        Self::Source(err.into())
    }

    /// Returns the framing error, if this is one.
    pub fn as_parse(&self) -> Option<&ParseError> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}
