//! Error types for Catena GQL

use thiserror::Error;

/// Main error type for builder construction and configuration.
///
/// Rendering never produces one of these: once a tree exists, `format_body`
/// always succeeds.
#[derive(Error, Debug)]
pub enum GqlError {
    /// A node was constructed with an unusable name or argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operations document could not be interpreted
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GqlError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<toml::de::Error> for GqlError {
    fn from(err: toml::de::Error) -> Self {
        GqlError::Config(format!("Failed to parse operations file: {}", err))
    }
}

impl From<toml::ser::Error> for GqlError {
    fn from(err: toml::ser::Error) -> Self {
        GqlError::Config(format!("Failed to serialize operations file: {}", err))
    }
}

/// Result type for Catena GQL operations
pub type GqlResult<T> = Result<T, GqlError>;
