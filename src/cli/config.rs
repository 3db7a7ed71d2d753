//! TOML configuration file support.
//!
//! Codec settings can be kept in a file instead of repeating flags:
//!
//! ```toml
//! # hmxml.toml
//! [codec]
//! target_namespace = "http://www.diamond.ac.uk/HMxml"
//! strict = false
//! indent = 4
//! xml_declaration = true
//! ```
//!
//! `--strict` and `--namespace` override the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use hmxml::codec::CodecConfig;

/// Root configuration structure for hmxml.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Parse and serialize settings.
    #[serde(default)]
    pub codec: CodecConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [codec]
            target_namespace = "http://www.diamond.ac.uk/HMxml"
            strict = true
            indent = 4
            xml_declaration = false
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(
            config.codec.target_namespace.as_deref(),
            Some("http://www.diamond.ac.uk/HMxml")
        );
        assert!(config.codec.strict);
        assert_eq!(config.codec.indent, Some(4));
        assert!(!config.codec.xml_declaration);
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [codec]
            strict = true
        "#;

        let config = Config::from_str(toml).unwrap();
        assert!(config.codec.strict);
        assert_eq!(config.codec.target_namespace, None);
        assert_eq!(config.codec.indent, Some(2));
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert!(!config.codec.strict);
        assert!(config.codec.xml_declaration);
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::from_str("[codec]\nstrict = \"yes\"").is_err());
    }
}
