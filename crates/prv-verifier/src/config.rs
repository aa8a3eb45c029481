//! Configuration for verification runs
//!
//! Names the servers to check, in order, and the locator program to run.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Configuration for the Verifier
///
/// # Examples
///
/// ```
/// use prv_verifier::VerifierConfig;
///
/// let config = VerifierConfig::default().with_servers(["river", "lake"]);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.locator_program, "prv");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// Servers to check after the local lookup, in order
    #[serde(default)]
    pub servers: Vec<String>,

    /// Program used by the subprocess locator
    /// Default: "prv"
    #[serde(default = "default_locator_program")]
    pub locator_program: String,

    /// Skip fingerprints already checked earlier in the same run
    /// Default: false (every record is checked, results collapse by fingerprint)
    #[serde(default)]
    pub deduplicate: bool,
}

fn default_locator_program() -> String {
    "prv".to_string()
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            servers: Vec::new(),
            locator_program: default_locator_program(),
            deduplicate: false,
        }
    }
}

impl VerifierConfig {
    /// Replace the server list
    pub fn with_servers<I, S>(mut self, servers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.servers = servers.into_iter().map(Into::into).collect();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.locator_program.trim().is_empty() {
            return Err("locator_program cannot be empty".to_string());
        }

        let mut seen = HashSet::new();
        for server in &self.servers {
            if server.trim().is_empty() {
                return Err("server names cannot be empty".to_string());
            }
            if !seen.insert(server.as_str()) {
                return Err(format!("duplicate server name: {}", server));
            }
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
