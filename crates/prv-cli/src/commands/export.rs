//! Export command implementation.

use crate::cli::ExportArgs;
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::Formatter;
use std::fs;

/// Execute the export command.
///
/// Always writes JSON, whatever the selected output format.
pub async fn execute_export(args: ExportArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let records = super::load_records(&args.document, &config.extractor)?;
    let json = Formatter::new(OutputFormat::Json, false).format_records_json(&records)?;

    match args.output {
        Some(path) => {
            fs::write(&path, json)?;
            eprintln!(
                "{}",
                formatter.success(&format!("Exported {} record(s) to {}", records.len(), path.display()))
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_export_to_file() {
        let dir = TempDir::new().unwrap();
        let document = dir.path().join("session.json");
        fs::write(
            &document,
            r#"{
                "raw": {"original_checksum": "abc", "original_size": 3, "original_path": "/d/raw.mda"},
                "sorted": {"data": {"original_checksum": "def", "original_size": 4}}
            }"#,
        )
        .unwrap();
        let output = dir.path().join("records.json");

        let args = ExportArgs {
            document,
            output: Some(output.clone()),
        };
        let formatter = Formatter::new(OutputFormat::Table, false);
        execute_export(args, &Config::default(), &formatter).await.unwrap();

        let exported: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        let labels: Vec<&str> = exported
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["label"].as_str().unwrap())
            .collect();
        assert_eq!(labels, vec!["raw", "sorted"]);
        assert_eq!(exported[0]["original_path"], "/d/raw.mda");
        assert_eq!(exported[1]["size"], 4);
    }

    #[tokio::test]
    async fn test_export_rejects_bad_json() {
        let dir = TempDir::new().unwrap();
        let document = dir.path().join("broken.json");
        fs::write(&document, "{ not json").unwrap();

        let args = ExportArgs {
            document,
            output: Some(PathBuf::from("unused.json")),
        };
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert!(execute_export(args, &Config::default(), &formatter).await.is_err());
    }
}
