//! Binding configuration.
//!
//! Every entry point takes a [`BindConfig`] by reference; nothing is stored
//! process-wide. Configuration can be built in code, parsed from TOML, or
//! overridden from environment variables.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Tag key used to resolve external names of query, form and multipart fields.
pub const DEFAULT_TAG_KEY: &str = "json";

/// Default memory threshold for multipart file content, in bytes (10 MiB).
pub const DEFAULT_MULTIPART_MAX_MEMORY: u64 = 10 * 1024 * 1024;

/// Settings shared by every binding call.
///
/// # Example
///
/// ```
/// use reqbind_core::BindConfig;
///
/// let config = BindConfig::from_toml_str(r#"
///     tag_key = "form"
///     multipart_max_memory = 1048576
/// "#).unwrap();
///
/// assert_eq!(config.tag_key, "form");
/// assert_eq!(config.json_tag_key, "json");
/// assert_eq!(config.multipart_max_memory, 1024 * 1024);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BindConfig {
    /// Tag key for query, URL-encoded and multipart binding.
    #[serde(default = "default_tag_key")]
    pub tag_key: String,

    /// Tag key for JSON bodies.
    #[serde(default = "default_json_tag_key")]
    pub json_tag_key: String,

    /// Tag key for XML bodies.
    #[serde(default = "default_xml_tag_key")]
    pub xml_tag_key: String,

    /// Bytes of multipart file content kept in memory before spilling to disk.
    #[serde(default = "default_multipart_max_memory")]
    pub multipart_max_memory: u64,
}

fn default_tag_key() -> String {
    DEFAULT_TAG_KEY.to_string()
}

fn default_json_tag_key() -> String {
    "json".to_string()
}

fn default_xml_tag_key() -> String {
    "xml".to_string()
}

fn default_multipart_max_memory() -> u64 {
    DEFAULT_MULTIPART_MAX_MEMORY
}

impl Default for BindConfig {
    fn default() -> Self {
        Self {
            tag_key: default_tag_key(),
            json_tag_key: default_json_tag_key(),
            xml_tag_key: default_xml_tag_key(),
            multipart_max_memory: default_multipart_max_memory(),
        }
    }
}

impl BindConfig {
    /// Parses a configuration from TOML. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::TomlError` on malformed TOML or unknown keys,
    /// and `ConfigError::ValidationError` if the result is invalid.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing, unreadable, or invalid.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }
        let content = fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Applies overrides from `PREFIX_TAG_KEY`, `PREFIX_JSON_TAG_KEY`,
    /// `PREFIX_XML_TAG_KEY` and `PREFIX_MULTIPART_MAX_MEMORY`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EnvParseError` if the memory threshold is not an
    /// integer, and `ConfigError::ValidationError` if the result is invalid.
    pub fn with_env_prefix(mut self, prefix: &str) -> Result<Self, ConfigError> {
        let prefix = prefix.to_uppercase();
        let var = |name: &str| {
            let key = format!("{prefix}_{name}");
            env::var(&key).ok().map(|value| (key, value))
        };

        if let Some((_, value)) = var("TAG_KEY") {
            self.tag_key = value;
        }
        if let Some((_, value)) = var("JSON_TAG_KEY") {
            self.json_tag_key = value;
        }
        if let Some((_, value)) = var("XML_TAG_KEY") {
            self.xml_tag_key = value;
        }
        if let Some((key, value)) = var("MULTIPART_MAX_MEMORY") {
            self.multipart_max_memory = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::env_parse_error(key, "expected integer"))?;
        }

        self.validate()?;
        Ok(self)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if a tag key is empty or the
    /// memory threshold is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("tag_key", &self.tag_key),
            ("json_tag_key", &self.json_tag_key),
            ("xml_tag_key", &self.xml_tag_key),
        ] {
            if value.is_empty() {
                return Err(ConfigError::validation_error(format!(
                    "{field} must not be empty"
                )));
            }
        }
        if self.multipart_max_memory == 0 {
            return Err(ConfigError::validation_error(
                "multipart_max_memory must be greater than 0",
            ));
        }
        Ok(())
    }

    /// Sets the tag key for query, form and multipart binding.
    #[must_use]
    pub fn with_tag_key(mut self, tag_key: impl Into<String>) -> Self {
        self.tag_key = tag_key.into();
        self
    }

    /// Sets the tag key for JSON bodies.
    #[must_use]
    pub fn with_json_tag_key(mut self, tag_key: impl Into<String>) -> Self {
        self.json_tag_key = tag_key.into();
        self
    }

    /// Sets the tag key for XML bodies.
    #[must_use]
    pub fn with_xml_tag_key(mut self, tag_key: impl Into<String>) -> Self {
        self.xml_tag_key = tag_key.into();
        self
    }

    /// Sets the multipart memory threshold in bytes.
    #[must_use]
    pub fn with_multipart_max_memory(mut self, bytes: u64) -> Self {
        self.multipart_max_memory = bytes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = BindConfig::default();
        assert_eq!(config.tag_key, "json");
        assert_eq!(config.json_tag_key, "json");
        assert_eq!(config.xml_tag_key, "xml");
        assert_eq!(config.multipart_max_memory, 10 * 1024 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = BindConfig::from_toml_str("").unwrap();
        assert_eq!(config, BindConfig::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = BindConfig::from_toml_str("tagkey = \"form\"");
        assert!(matches!(result, Err(ConfigError::TomlError(_))));
    }

    #[test]
    fn test_validation() {
        let config = BindConfig::default().with_tag_key("");
        assert!(config.validate().is_err());

        let config = BindConfig::default().with_multipart_max_memory(0);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("multipart_max_memory"));
    }

    #[test]
    fn test_builder_setters() {
        let config = BindConfig::default()
            .with_tag_key("form")
            .with_json_tag_key("j")
            .with_xml_tag_key("x")
            .with_multipart_max_memory(64);

        assert_eq!(config.tag_key, "form");
        assert_eq!(config.json_tag_key, "j");
        assert_eq!(config.xml_tag_key, "x");
        assert_eq!(config.multipart_max_memory, 64);
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "xml_tag_key = \"xmlname\"").unwrap();

        let config = BindConfig::from_file(file.path()).unwrap();
        assert_eq!(config.xml_tag_key, "xmlname");
        assert_eq!(config.tag_key, "json");
    }

    #[test]
    fn test_from_missing_file() {
        let err = BindConfig::from_file("/nonexistent/reqbind.toml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_env_overrides() {
        // Prefix is unique to this test so parallel tests do not interfere.
        env::set_var("REQBIND_ENV_TEST_TAG_KEY", "form");
        env::set_var("REQBIND_ENV_TEST_MULTIPART_MAX_MEMORY", "2048");

        let config = BindConfig::default()
            .with_env_prefix("reqbind_env_test")
            .unwrap();

        assert_eq!(config.tag_key, "form");
        assert_eq!(config.multipart_max_memory, 2048);
        assert_eq!(config.json_tag_key, "json");

        env::remove_var("REQBIND_ENV_TEST_TAG_KEY");
        env::remove_var("REQBIND_ENV_TEST_MULTIPART_MAX_MEMORY");
    }

    #[test]
    fn test_env_parse_error() {
        env::set_var("REQBIND_BAD_TEST_MULTIPART_MAX_MEMORY", "lots");

        let err = BindConfig::default()
            .with_env_prefix("REQBIND_BAD_TEST")
            .unwrap_err();
        assert!(matches!(err, ConfigError::EnvParseError { .. }));

        env::remove_var("REQBIND_BAD_TEST_MULTIPART_MAX_MEMORY");
    }
}
