//! Command implementations.

pub mod check;
pub mod export;
pub mod list;

pub use self::check::execute_check;
pub use self::export::execute_export;
pub use self::list::execute_list;

use crate::error::Result;
use prv_domain::ProvenanceRecord;
use prv_extractor::{ExtractorConfig, TreeExtractor};
use std::path::Path;

/// Read a document and extract its records.
///
/// Without a configured root label, the document's file stem labels the root.
pub fn load_records(document: &Path, config: &ExtractorConfig) -> Result<Vec<ProvenanceRecord>> {
    let mut config = config.clone();
    if config.root_label.is_empty() {
        if let Some(stem) = document.file_stem() {
            config.root_label = stem.to_string_lossy().into_owned();
        }
    }

    let extractor = TreeExtractor::new(config)?;
    Ok(extractor.extract_path(document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_root_label_from_file_stem() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, r#"{"original_checksum": "abc", "original_size": 3}"#).unwrap();

        let records = load_records(&path, &ExtractorConfig::default()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].label, "session");

        let labelled = ExtractorConfig::default().with_root_label("root");
        let records = load_records(&path, &labelled).unwrap();
        assert_eq!(records[0].label, "root");
    }

    #[test]
    fn test_missing_document() {
        let dir = TempDir::new().unwrap();
        let result = load_records(&dir.path().join("absent.json"), &ExtractorConfig::default());
        assert!(result.is_err());
    }
}
