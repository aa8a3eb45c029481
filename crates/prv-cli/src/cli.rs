//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// prv-check - Find where the files behind a provenance document live.
#[derive(Debug, Parser)]
#[command(name = "prv-check")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (default: ~/.prv/config.toml)
    #[arg(short, long, global = true, env = "PRV_CHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// More log output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check where every record's file can be found
    Check(CheckArgs),

    /// List the records found in a document
    List(ListArgs),

    /// Write the records found in a document as plain JSON
    Export(ExportArgs),
}

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// Provenance document (JSON)
    pub document: PathBuf,

    /// Server to check, in order (repeatable; replaces the configured list)
    #[arg(short, long = "server", value_name = "NAME")]
    pub servers: Vec<String>,

    /// Locator program to run
    #[arg(short, long, value_name = "PROGRAM")]
    pub locator: Option<String>,

    /// Check each distinct file only once
    #[arg(long)]
    pub dedupe: bool,
}

/// Arguments for the list command.
#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Provenance document (JSON)
    pub document: PathBuf,
}

/// Arguments for the export command.
#[derive(Debug, Parser)]
pub struct ExportArgs {
    /// Provenance document (JSON)
    pub document: PathBuf,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}
