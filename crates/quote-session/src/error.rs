//! # Session Error Types
//!
//! Errors raised while configuring a session. Errors from quote
//! operations are [`quote_core::CoreError`]; draft load/save failures never
//! leave the manager.

use quote_store::StoreError;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read or written.
    #[error("Config file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for this schema.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be written as TOML.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Config parsed but a value is unusable.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// The configured draft store could not be opened.
    #[error("Failed to open draft store: {0}")]
    Store(#[from] StoreError),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_message() {
        let err = ConfigError::Invalid("currency_code must be 3 letters".into());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: currency_code must be 3 letters"
        );
    }

    #[test]
    fn test_toml_error_converts() {
        let parse: Result<toml::Value, _> = toml::from_str("[store\nbackend = ");
        let err: ConfigError = parse.unwrap_err().into();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
