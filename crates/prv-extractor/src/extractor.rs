//! Core tree extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::{is_provenance_object, parse_record};
use prv_domain::ProvenanceRecord;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Flattens a document tree into the provenance records it contains
///
/// Records come out depth-first, in object key order and array index order.
/// An object carrying both a checksum and a size is a record and is not
/// descended into; other objects label their children by key (except the
/// wrapper key, which keeps the parent's label); array elements get
/// `label[index]`; scalars contribute nothing.
#[derive(Debug, Clone, Default)]
pub struct TreeExtractor {
    config: ExtractorConfig,
}

impl TreeExtractor {
    /// Create a new extractor
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self { config })
    }

    /// Get the configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract every record under `node`, labelling the root `label`
    pub fn extract(&self, label: &str, node: &Value) -> Vec<ProvenanceRecord> {
        let mut records = Vec::new();
        self.walk(label, node, &mut records);
        debug!("Extracted {} provenance record(s) under '{}'", records.len(), label);
        records
    }

    /// Parse JSON text and extract from its root
    pub fn extract_str(&self, text: &str) -> Result<Vec<ProvenanceRecord>, ExtractorError> {
        let document: Value = serde_json::from_str(text)?;
        Ok(self.extract(&self.config.root_label, &document))
    }

    /// Read a JSON document from disk and extract from its root
    pub fn extract_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<ProvenanceRecord>, ExtractorError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let records = self.extract_str(&text)?;
        info!("Found {} provenance record(s) in {}", records.len(), path.display());
        Ok(records)
    }

    fn walk(&self, label: &str, root: &Value, out: &mut Vec<ProvenanceRecord>) {
        // Explicit stack: nesting depth is bounded only by the document
        let mut pending: Vec<(String, &Value)> = vec![(label.to_string(), root)];

        while let Some((label, node)) = pending.pop() {
            match node {
                Value::Object(obj) if is_provenance_object(obj) => {
                    out.push(parse_record(&label, obj));
                }
                Value::Object(obj) => {
                    // Reversed so children pop in key order
                    for (key, child) in obj.iter().rev() {
                        let child_label = if *key == self.config.data_key {
                            label.clone()
                        } else {
                            key.clone()
                        };
                        pending.push((child_label, child));
                    }
                }
                Value::Array(items) => {
                    for (index, child) in items.iter().enumerate().rev() {
                        pending.push((format!("{}[{}]", label, index), child));
                    }
                }
                Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
            }
        }
    }
}

/// Extract with the default configuration
///
/// # Examples
///
/// ```
/// use serde_json::json;
///
/// let doc = json!({
///     "data": {
///         "firings": {"original_checksum": "abc", "original_size": 10}
///     }
/// });
/// let records = prv_extractor::extract("root", &doc);
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].label, "firings");
/// ```
pub fn extract(label: &str, node: &Value) -> Vec<ProvenanceRecord> {
    TreeExtractor::default().extract(label, node)
}
