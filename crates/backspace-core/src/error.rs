//! Error types for the backspace effect

use thiserror::Error;

/// The main error type for backspace operations
#[derive(Debug, Error)]
pub enum BackspaceError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("JSON parse error: {0}")]
    JsonParseError(String),

    #[error("Invalid config section: expected a table under '{0}'")]
    InvalidConfigSection(String),

    #[error("Unsupported config format: {0}")]
    UnsupportedConfigFormat(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },
}

/// Result type alias for backspace operations
pub type Result<T> = std::result::Result<T, BackspaceError>;

impl From<toml::de::Error> for BackspaceError {
    fn from(err: toml::de::Error) -> Self {
        BackspaceError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for BackspaceError {
    fn from(err: toml::ser::Error) -> Self {
        BackspaceError::TomlSerError(err.to_string())
    }
}

impl From<serde_json::Error> for BackspaceError {
    fn from(err: serde_json::Error) -> Self {
        BackspaceError::JsonParseError(err.to_string())
    }
}
