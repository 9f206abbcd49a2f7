//! Error types for the insulin_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for insulin_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Multiplier selection outside the tier's option set
    #[error("Selection error: {0}")]
    Selection(String),

    /// Summary payload rejected by validation
    #[error("Summary error: {0}")]
    Summary(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
