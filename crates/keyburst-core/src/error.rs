//! Error types for Keyburst

use thiserror::Error;

/// The main error type for Keyburst operations
#[derive(Debug, Error)]
pub enum KeyburstError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Render error: {0}")]
    RenderError(String),
}

/// Result type alias for Keyburst operations
pub type Result<T> = std::result::Result<T, KeyburstError>;

impl From<toml::de::Error> for KeyburstError {
    fn from(err: toml::de::Error) -> Self {
        KeyburstError::TomlParseError(err.to_string())
    }
}
