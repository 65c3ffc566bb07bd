//! Error types for Otto

use thiserror::Error;

/// The main error type for Otto operations
#[derive(Debug, Error)]
pub enum OttoError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

/// Result type alias for Otto operations
pub type Result<T> = std::result::Result<T, OttoError>;

impl From<toml::de::Error> for OttoError {
    fn from(err: toml::de::Error) -> Self {
        OttoError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for OttoError {
    fn from(err: toml::ser::Error) -> Self {
        OttoError::TomlSerError(err.to_string())
    }
}
