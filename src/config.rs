//! Configuration for SSRF import and export

use serde::{Deserialize, Serialize};

use crate::scalar::Classification;

/// Namespace of SSRF 3.1 documents
pub const SSRF_NAMESPACE: &str = "urn:us:gov:dod:standard:ssrf:3.1.0";

/// Configuration for reading and writing SSRF documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SsrfConfig {
    /// Marking applied on export to set scalars that carry none
    pub default_classification: Option<Classification>,

    /// Every present scalar must carry a `cls` attribute
    pub require_classification: bool,

    /// Abort an import on the first field error instead of collecting it
    pub strict: bool,

    /// Namespace expected on import and written on export
    pub namespace: String,

    /// Indentation width of exported XML (0 = single line)
    pub indent: usize,
}

impl Default for SsrfConfig {
    fn default() -> Self {
        Self {
            default_classification: None,
            require_classification: true,
            strict: false,
            namespace: SSRF_NAMESPACE.to_string(),
            indent: 2,
        }
    }
}

impl SsrfConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> SsrfConfigBuilder {
        SsrfConfigBuilder::default()
    }

    /// Parse a TOML configuration file body
    #[cfg(feature = "cli")]
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Builder for SsrfConfig
#[derive(Debug, Default)]
pub struct SsrfConfigBuilder {
    config: SsrfConfig,
}

impl SsrfConfigBuilder {
    pub fn default_classification(mut self, classification: Classification) -> Self {
        self.config.default_classification = Some(classification);
        self
    }

    pub fn require_classification(mut self, require: bool) -> Self {
        self.config.require_classification = require;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.config.strict = strict;
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.namespace = namespace.into();
        self
    }

    /// Set the export indentation, capped at 8
    pub fn indent(mut self, indent: usize) -> Self {
        self.config.indent = indent.min(8);
        self
    }

    /// Build the configuration
    pub fn build(self) -> SsrfConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SsrfConfig::default();
        assert!(config.require_classification);
        assert!(!config.strict);
        assert_eq!(config.namespace, SSRF_NAMESPACE);
        assert_eq!(config.indent, 2);
    }

    #[test]
    fn test_builder() {
        let config = SsrfConfig::builder()
            .default_classification(Classification::Unclassified)
            .strict(true)
            .indent(20)
            .build();

        assert_eq!(
            config.default_classification,
            Some(Classification::Unclassified)
        );
        assert!(config.strict);
        assert_eq!(config.indent, 8);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SsrfConfig =
            serde_json::from_str(r#"{"strict": true, "defaultClassification": "R"}"#).unwrap();
        assert!(config.strict);
        assert!(config.require_classification);
        assert_eq!(config.default_classification, Some(Classification::Restricted));
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_from_toml() {
        let config =
            SsrfConfig::from_toml_str("requireClassification = false\nindent = 0\n").unwrap();
        assert!(!config.require_classification);
        assert_eq!(config.indent, 0);
    }
}
