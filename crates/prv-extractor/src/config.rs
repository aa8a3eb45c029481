//! Configuration for the Extractor

use serde::{Deserialize, Serialize};

/// Configuration for the tree extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Label given to the document root
    #[serde(default)]
    pub root_label: String,

    /// Wrapper key whose value inherits the parent's label
    #[serde(default = "default_data_key")]
    pub data_key: String,
}

fn default_data_key() -> String {
    "data".to_string()
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            root_label: String::new(),
            data_key: default_data_key(),
        }
    }
}

impl ExtractorConfig {
    /// Set the root label
    pub fn with_root_label(mut self, root_label: impl Into<String>) -> Self {
        self.root_label = root_label.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.data_key.is_empty() {
            return Err("data_key cannot be empty".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.data_key, "data");
    }

    #[test]
    fn test_empty_data_key_rejected() {
        let config = ExtractorConfig {
            data_key: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ExtractorConfig::from_toml("root_label = \"session\"").unwrap();
        assert_eq!(config.root_label, "session");
        assert_eq!(config.data_key, "data");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::default().with_root_label("root");
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }
}
