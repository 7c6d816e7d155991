use crate::{error::ConfigError, limits::Limits};

/// How the boundary token is cut out of the `Content-Type` value.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryMode {
    /// Everything after `; boundary=` is the token, including any later parameters.
    #[default]
    Verbatim,
    /// The token ends at the next `;`, with trailing whitespace removed.
    TrimParameters,
}

/// Top-level parser configuration model.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParserConfig {
    /// Boundary extraction strategy.
    pub boundary_mode: BoundaryMode,
    /// Per-part resource limits.
    pub limits: Limits,
}

impl ParserConfig {
    /// Creates a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.limits.validate()
    }
}
