//! Error types for Beacon tracking operations.
//!
//! The tracking wire format is deliberately permissive: inputs are carried
//! as-is rather than validated, so very little here can fail. The variants
//! below cover the few places where a conversion genuinely has no answer.

use thiserror::Error;

/// Main error type for Beacon operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A timestamp input could not be coerced to whole seconds since epoch.
    ///
    /// This is the only failure the query-building inputs themselves can
    /// produce: everything else is accepted verbatim.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// A JSON value has no representation as a query property.
    #[error("Unsupported property value: {0}")]
    UnsupportedProperty(String),

    /// A tracking endpoint URL could not be parsed or joined.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Client configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Specialized result type for Beacon operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}
