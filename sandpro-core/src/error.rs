//! Error types for sandpro operations.

use thiserror::Error;

/// Result type alias using sandpro Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during sandpro operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A required field is missing, non-numeric, or non-finite.
    #[error("invalid input for '{field}': {reason}")]
    InvalidInput {
        /// Parameter key or input field name.
        field: String,
        /// What was wrong with the value.
        reason: String,
    },

    /// Parameter key not present in the registry.
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    /// Value violates the registry rule for its unit.
    #[error("out of range for '{field}': {message}")]
    OutOfRange {
        /// Parameter key.
        field: String,
        /// Human-readable rule description.
        message: String,
    },

    /// Malformed parameter file.
    #[error("config error: {0}")]
    Config(String),

    /// JSON serialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors (parameter file reads).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for an [`Error::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Field name carried by the error, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidInput { field, .. } | Self::OutOfRange { field, .. } => Some(field.as_str()),
            Self::UnknownParameter(key) => Some(key.as_str()),
            Self::Config(_) | Self::Serialization(_) | Self::Io(_) => None,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
