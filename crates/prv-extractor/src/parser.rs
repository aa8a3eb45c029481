//! Parse source-document objects into provenance records
//!
//! The document form names its identifying fields differently from the plain
//! representation:
//!
//! | Document field           | Record field      |
//! |--------------------------|-------------------|
//! | `original_path`          | `original_path`   |
//! | `original_checksum`      | `checksum`        |
//! | `original_checksum_1000` | `checksum_prefix` |
//! | `original_size`          | `size`            |
//! | `processes`              | `lineage`         |
//!
//! Process entries keep `processor_name`, `processor_version` and `parameters`,
//! but carry `inputs`/`outputs` as objects mapping a name to a nested
//! provenance object. Missing or wrong-typed fields become defaults.

use prv_domain::{ProcessRecord, ProvenanceRecord};
use serde_json::{Map, Value};
use tracing::debug;

/// Document key holding the source path
pub const ORIGINAL_PATH: &str = "original_path";
/// Document key holding the full checksum
pub const ORIGINAL_CHECKSUM: &str = "original_checksum";
/// Document key holding the prefix checksum
pub const ORIGINAL_CHECKSUM_PREFIX: &str = "original_checksum_1000";
/// Document key holding the byte size
pub const ORIGINAL_SIZE: &str = "original_size";
/// Document key holding the lineage array
pub const PROCESSES: &str = "processes";

/// True if `obj` carries both a checksum and a size and so denotes a record
pub fn is_provenance_object(obj: &Map<String, Value>) -> bool {
    obj.contains_key(ORIGINAL_CHECKSUM) && obj.contains_key(ORIGINAL_SIZE)
}

/// Build a record from a document object
pub fn parse_record(label: &str, obj: &Map<String, Value>) -> ProvenanceRecord {
    let lineage = match obj.get(PROCESSES) {
        Some(Value::Array(entries)) => entries.iter().map(parse_process).collect(),
        Some(other) => {
            debug!("Ignoring non-array '{}' under '{}': {}", PROCESSES, label, other);
            Vec::new()
        }
        None => Vec::new(),
    };

    ProvenanceRecord {
        label: label.to_string(),
        checksum: string_field(obj, ORIGINAL_CHECKSUM),
        checksum_prefix: string_field(obj, ORIGINAL_CHECKSUM_PREFIX),
        size: parse_size(obj.get(ORIGINAL_SIZE)),
        original_path: string_field(obj, ORIGINAL_PATH),
        lineage,
        raw_source: Some(Value::Object(obj.clone())),
    }
}

/// Build a lineage step from a document `processes` entry
fn parse_process(value: &Value) -> ProcessRecord {
    let Some(obj) = value.as_object() else {
        debug!("Ignoring non-object process entry: {}", value);
        return ProcessRecord::default();
    };

    ProcessRecord {
        processor_name: string_field(obj, "processor_name"),
        processor_version: string_field(obj, "processor_version"),
        inputs: parse_named_records(obj.get("inputs")),
        outputs: parse_named_records(obj.get("outputs")),
        parameters: obj
            .get("parameters")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default(),
    }
}

/// Parse a `{name: provenance object}` mapping in key order
fn parse_named_records(value: Option<&Value>) -> Vec<ProvenanceRecord> {
    let Some(map) = value.and_then(Value::as_object) else {
        return Vec::new();
    };

    let empty = Map::new();
    map.iter()
        .map(|(name, nested)| parse_record(name, nested.as_object().unwrap_or(&empty)))
        .collect()
}

fn string_field(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

/// Sizes may arrive as integers, floats or decimal strings
fn parse_size(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_parse_full_record() {
        let source = obj(json!({
            "original_path": "/data/raw.mda",
            "original_checksum": "abc123",
            "original_checksum_1000": "ab",
            "original_size": 4096,
            "processes": [{
                "processor_name": "ms3.whiten",
                "processor_version": "0.11",
                "parameters": {"quantization_unit": 0.1},
                "inputs": {
                    "timeseries": {
                        "original_path": "/data/pre.mda",
                        "original_checksum": "def",
                        "original_size": 4096
                    }
                },
                "outputs": {
                    "timeseries_out": {
                        "original_checksum": "abc123",
                        "original_size": 4096
                    }
                }
            }]
        }));

        let record = parse_record("raw", &source);
        assert_eq!(record.label, "raw");
        assert_eq!(record.original_path, "/data/raw.mda");
        assert_eq!(record.checksum, "abc123");
        assert_eq!(record.checksum_prefix, "ab");
        assert_eq!(record.size, 4096);
        assert_eq!(record.raw_source, Some(Value::Object(source.clone())));

        assert_eq!(record.lineage.len(), 1);
        let process = &record.lineage[0];
        assert_eq!(process.processor_name, "ms3.whiten");
        assert_eq!(process.processor_version, "0.11");
        assert_eq!(process.parameters["quantization_unit"], json!(0.1));
        assert_eq!(process.inputs.len(), 1);
        assert_eq!(process.inputs[0].label, "timeseries");
        assert_eq!(process.inputs[0].checksum, "def");
        assert_eq!(process.outputs[0].label, "timeseries_out");
    }

    #[test]
    fn test_malformed_fields_default() {
        let source = obj(json!({
            "original_checksum": 17,
            "original_size": "not a number",
            "original_path": null,
            "processes": {"oops": true}
        }));

        let record = parse_record("bad", &source);
        assert_eq!(record.checksum, "");
        assert_eq!(record.size, 0);
        assert_eq!(record.original_path, "");
        assert!(record.lineage.is_empty());
    }

    #[test]
    fn test_size_variants() {
        assert_eq!(parse_size(Some(&json!(12))), 12);
        assert_eq!(parse_size(Some(&json!(12.9))), 12);
        assert_eq!(parse_size(Some(&json!("345"))), 345);
        assert_eq!(parse_size(Some(&json!(-5))), 0);
        assert_eq!(parse_size(Some(&json!([1]))), 0);
        assert_eq!(parse_size(None), 0);
    }

    #[test]
    fn test_malformed_process_entries() {
        let source = obj(json!({
            "original_checksum": "c",
            "original_size": 1,
            "processes": [
                "not an object",
                {"processor_name": "p", "inputs": [1, 2], "outputs": {"o": 5}, "parameters": 3}
            ]
        }));

        let record = parse_record("x", &source);
        assert_eq!(record.lineage.len(), 2);
        assert_eq!(record.lineage[0], ProcessRecord::default());

        let process = &record.lineage[1];
        assert_eq!(process.processor_name, "p");
        assert!(process.inputs.is_empty());
        assert!(process.parameters.is_empty());
        assert_eq!(process.outputs.len(), 1);
        assert_eq!(process.outputs[0].label, "o");
        assert_eq!(process.outputs[0].checksum, "");
    }

    #[test]
    fn test_predicate_requires_both_fields() {
        assert!(is_provenance_object(&obj(json!({"original_checksum": "a", "original_size": 1}))));
        assert!(is_provenance_object(&obj(json!({"original_checksum": null, "original_size": null}))));
        assert!(!is_provenance_object(&obj(json!({"original_checksum": "a"}))));
        assert!(!is_provenance_object(&obj(json!({"checksum": "a", "size": 1}))));
    }
}
