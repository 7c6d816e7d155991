use crate::{
    config::{BoundaryMode, ParserConfig},
    error::{ConfigError, MultipartError},
    limits::Limits,
    multipart::Multipart,
};

/// Builder for configuring a [`Multipart`] parser.
#[derive(Debug, Clone, Default)]
pub struct MultipartBuilder {
    config: ParserConfig,
}

impl MultipartBuilder {
    /// Creates a builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current builder configuration snapshot.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Replaces the full builder configuration.
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets how the boundary token is extracted from the content type.
    pub fn boundary_mode(mut self, mode: BoundaryMode) -> Self {
        self.config.boundary_mode = mode;
        self
    }

    /// Sets all per-part limits.
    pub fn limits(mut self, limits: Limits) -> Self {
        self.config.limits = limits;
        self
    }

    /// Sets the maximum header line length in bytes.
    pub fn max_header_line_len(mut self, max: usize) -> Self {
        self.config.limits.max_header_line_len = Some(max);
        self
    }

    /// Sets the maximum number of header lines per part.
    pub fn max_headers(mut self, max: usize) -> Self {
        self.config.limits.max_headers = Some(max);
        self
    }

    /// Sets the maximum accepted part `Content-Length`.
    pub fn max_content_length(mut self, max: u64) -> Self {
        self.config.limits.max_content_length = Some(max);
        self
    }

    /// Validates builder configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.config.validate()
    }

    /// Finalizes and returns validated configuration.
    pub fn build_config(self) -> Result<ParserConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }

    /// Builds a parser for `content_type` reading from `source`.
    pub fn build<S>(self, content_type: &str, source: S) -> Result<Multipart<S>, MultipartError> {
        Multipart::with_config(content_type, source, self.config)
    }
}
