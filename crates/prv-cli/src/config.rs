//! Configuration management for the CLI.

use crate::cli::CheckArgs;
use crate::error::{CliError, Result};
use prv_extractor::ExtractorConfig;
use prv_verifier::VerifierConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
///
/// ```toml
/// [verifier]
/// servers = ["river", "lake"]
/// locator_program = "prv"
///
/// [extractor]
/// root_label = "session"
///
/// [settings]
/// color = true
/// format = "table"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    /// Verification settings
    #[serde(default)]
    pub verifier: VerifierConfig,

    /// Document extraction settings
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".prv").join("config.toml"))
    }

    /// Load configuration from `path`, or from the default path.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load_from(&Self::path()?),
        }
    }

    /// Load configuration from a file; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.verifier
            .validate()
            .map_err(|e| CliError::Config(format!("[verifier] {}", e)))?;
        self.extractor
            .validate()
            .map_err(|e| CliError::Config(format!("[extractor] {}", e)))?;
        Ok(())
    }

    /// Apply `check` flags on top of the file values.
    pub fn apply_check_args(&mut self, args: &CheckArgs) {
        if !args.servers.is_empty() {
            self.verifier.servers = args.servers.clone();
        }
        if let Some(program) = &args.locator {
            self.verifier.locator_program = program.clone();
        }
        if args.dedupe {
            self.verifier.deduplicate = true;
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn check_args(servers: &[&str], locator: Option<&str>, dedupe: bool) -> CheckArgs {
        CheckArgs {
            document: PathBuf::from("doc.json"),
            servers: servers.iter().map(|s| s.to_string()).collect(),
            locator: locator.map(String::from),
            dedupe,
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.verifier.servers.is_empty());
        assert_eq!(config.verifier.locator_program, "prv");
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[verifier]\nservers = [\"river\", \"lake\"]\n\n[settings]\nformat = \"json\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.verifier.servers, vec!["river", "lake"]);
        assert_eq!(config.verifier.locator_program, "prv");
        assert_eq!(config.extractor, ExtractorConfig::default());
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert!(config.settings.color);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[verifier]\nservers = [\"river\", \"river\"]\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(CliError::Config(_))));

        fs::write(&path, "[verifier\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(CliError::Toml(_))));
    }

    #[test]
    fn test_flags_override_file() {
        let mut config = Config::default();
        config.verifier.servers = vec!["river".to_string()];

        config.apply_check_args(&check_args(&[], None, false));
        assert_eq!(config.verifier.servers, vec!["river"]);
        assert!(!config.verifier.deduplicate);

        config.apply_check_args(&check_args(&["lake", "sea"], Some("/opt/prv"), true));
        assert_eq!(config.verifier.servers, vec!["lake", "sea"]);
        assert_eq!(config.verifier.locator_program, "/opt/prv");
        assert!(config.verifier.deduplicate);
    }
}
