//! Error types for binding and configuration.
//!
//! Binding failures carry the external name of the offending field together
//! with the coercion cause, so callers can tell which input was rejected.

use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;
use thiserror::Error;

/// Why a single raw value could not be written into a field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoerceError {
    /// The value is not a base-10 signed 64-bit integer.
    #[error("{0}")]
    Integer(#[from] ParseIntError),

    /// The value is not a decimal or exponential floating point number.
    #[error("{0}")]
    Float(#[from] ParseFloatError),

    /// The value is not a recognized boolean spelling.
    #[error("invalid boolean syntax: {0:?}")]
    Boolean(String),

    /// The field's declared type cannot take a text value.
    #[error("unsupported kind {0}")]
    UnsupportedKind(&'static str),

    /// The field's declared type cannot take a file part.
    #[error("unsupported multipart kind {0}")]
    UnsupportedMultipartKind(&'static str),

    /// A structured document supplied an object or nested array for a field.
    #[error("unsupported composite value: {0}")]
    CompositeValue(&'static str),
}

/// A coercion failure attributed to one external field name.
///
/// Binding stops at the first failure. Fields written before it keep their
/// new values, so the record must be discarded.
///
/// # Example
///
/// ```
/// use reqbind_core::{BindError, CoerceError};
///
/// let err = BindError::new("flag", CoerceError::Boolean("maybe".to_string()));
/// assert_eq!(err.name(), "flag");
/// assert_eq!(err.to_string(), "flag: invalid boolean syntax: \"maybe\"");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{name}: {source}")]
pub struct BindError {
    name: String,
    #[source]
    source: CoerceError,
}

impl BindError {
    /// Creates an error for the field bound under `name`.
    pub fn new(name: impl Into<String>, source: CoerceError) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }

    /// Returns the external name of the field that failed.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the underlying coercion failure.
    #[must_use]
    pub fn cause(&self) -> &CoerceError {
        &self.source
    }
}

/// Errors that can occur while loading a [`BindConfig`](crate::BindConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Failed to read configuration file.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Environment variable parsing error.
    #[error("failed to parse environment variable {var}: {reason}")]
    EnvParseError {
        /// The environment variable name.
        var: String,
        /// Explanation of the parsing error.
        reason: String,
    },

    /// Validation error after loading.
    #[error("configuration validation failed: {0}")]
    ValidationError(String),
}

impl ConfigError {
    /// Create a new file not found error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a new read error.
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Create a new environment variable parse error.
    pub fn env_parse_error(var: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EnvParseError {
            var: var.into(),
            reason: reason.into(),
        }
    }

    /// Create a new validation error.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_error_names_field() {
        let cause = "abc".parse::<i64>().unwrap_err();
        let err = BindError::new("int", CoerceError::from(cause));

        assert_eq!(err.name(), "int");
        assert!(err.to_string().starts_with("int: "));
        assert!(err.to_string().contains("invalid digit"));
    }

    #[test]
    fn test_bind_error_source_chain() {
        use std::error::Error as _;

        let err = BindError::new("file", CoerceError::UnsupportedMultipartKind("String"));
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "unsupported multipart kind String");
    }

    #[test]
    fn test_unsupported_kind_message() {
        let err = BindError::new("ratio", CoerceError::UnsupportedKind("f32"));
        assert_eq!(err.to_string(), "ratio: unsupported kind f32");
    }

    #[test]
    fn test_file_not_found_error() {
        let err = ConfigError::file_not_found("/path/to/reqbind.toml");
        assert!(err.to_string().contains("/path/to/reqbind.toml"));
    }

    #[test]
    fn test_env_parse_error() {
        let err = ConfigError::env_parse_error("REQBIND_MULTIPART_MAX_MEMORY", "expected integer");
        assert!(err.to_string().contains("REQBIND_MULTIPART_MAX_MEMORY"));
        assert!(err.to_string().contains("expected integer"));
    }

    #[test]
    fn test_validation_error() {
        let err = ConfigError::validation_error("tag_key must not be empty");
        assert!(err.to_string().contains("tag_key must not be empty"));
    }
}
