//! Error types for lite-youtube
//!
//! Recognition failures (foreign hosts, malformed ids, unparsable start
//! times) are never errors: they degrade to "leave the link untouched" and are
//! reported through the `log` facade. Only boundary failures land here.

use thiserror::Error;

/// Main error type for lite-youtube operations
#[derive(Debug, Error)]
pub enum LiteError {
    /// HTML parsing error
    #[error("HTML parse error: {0}")]
    HtmlParse(String),

    /// A URL could not be constructed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Configuration file could not be decoded
    #[error("Configuration decode error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type for lite-youtube operations
pub type Result<T> = std::result::Result<T, LiteError>;
