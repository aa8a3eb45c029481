//! Provenance records and their lineage
//!
//! Records are read-only value objects once parsed. The plain serialized form
//! uses fixed field names because stored files and downstream tools depend on
//! them:
//!
//! ```text
//! ProvenanceRecord: {label, checksum, checksum_prefix, size, original_path, processes}
//! ProcessRecord:    {processor_name, processor_version, inputs, outputs, parameters}
//! ```
//!
//! `raw_source` is not part of the plain form. A round trip through
//! [`ProvenanceRecord::to_plain`] and [`ProvenanceRecord::from_plain`] drops it.

use crate::Fingerprint;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// One piece of content, identified by checksum and size
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvenanceRecord {
    /// Human-readable, path-derived name (not part of identity)
    pub label: String,

    /// Full cryptographic content hash
    pub checksum: String,

    /// Hash over the leading byte range, used alongside `checksum`
    pub checksum_prefix: String,

    /// Byte length
    pub size: u64,

    /// Filesystem path at the time of recording (advisory only)
    pub original_path: String,

    /// Processes that produced or consumed this content
    #[serde(rename = "processes")]
    pub lineage: Vec<ProcessRecord>,

    /// Copy of the source object this record was parsed from
    #[serde(skip)]
    pub raw_source: Option<Value>,
}

impl ProvenanceRecord {
    /// Create a record with an empty path and no lineage
    pub fn new(label: impl Into<String>, checksum: impl Into<String>, size: u64) -> Self {
        Self {
            label: label.into(),
            checksum: checksum.into(),
            size,
            ..Default::default()
        }
    }

    /// Set the prefix checksum
    pub fn with_checksum_prefix(mut self, checksum_prefix: impl Into<String>) -> Self {
        self.checksum_prefix = checksum_prefix.into();
        self
    }

    /// Set the original path
    pub fn with_original_path(mut self, original_path: impl Into<String>) -> Self {
        self.original_path = original_path.into();
        self
    }

    /// Append a lineage step
    pub fn with_process(mut self, process: ProcessRecord) -> Self {
        self.lineage.push(process);
        self
    }

    /// Attach the source object this record came from
    pub fn with_raw_source(mut self, raw_source: Value) -> Self {
        self.raw_source = Some(raw_source);
        self
    }

    /// Copy of this record with `raw_source` cleared throughout the lineage
    ///
    /// This is exactly what survives a round trip through the plain form.
    pub fn without_raw_source(&self) -> Self {
        Self {
            lineage: self.lineage.iter().map(ProcessRecord::without_raw_source).collect(),
            raw_source: None,
            ..self.clone()
        }
    }

    /// Identity of the content: `checksum:size`
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::new(&self.checksum, self.size)
    }

    /// True if both records describe the same content
    pub fn same_content(&self, other: &ProvenanceRecord) -> bool {
        self.checksum == other.checksum && self.size == other.size
    }

    /// Last component of `original_path`, or empty when there is none
    pub fn file_name(&self) -> String {
        Path::new(&self.original_path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Serialize to the plain key-value representation
    pub fn to_plain(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Rebuild a record from the plain representation
    ///
    /// Missing fields take their defaults. `raw_source` is always `None`.
    pub fn from_plain(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }
}

/// One lineage step: a processor run with its inputs and outputs
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessRecord {
    /// Name of the processor that ran
    pub processor_name: String,

    /// Version of the processor that ran
    pub processor_version: String,

    /// Content consumed by the process
    pub inputs: Vec<ProvenanceRecord>,

    /// Content produced by the process
    pub outputs: Vec<ProvenanceRecord>,

    /// Processor parameters, opaque to this crate
    pub parameters: Map<String, Value>,
}

impl ProcessRecord {
    /// Create a process record with no inputs, outputs or parameters
    pub fn new(processor_name: impl Into<String>, processor_version: impl Into<String>) -> Self {
        Self {
            processor_name: processor_name.into(),
            processor_version: processor_version.into(),
            ..Default::default()
        }
    }

    /// Copy of this process with `raw_source` cleared on every input and output
    pub fn without_raw_source(&self) -> Self {
        Self {
            inputs: self.inputs.iter().map(ProvenanceRecord::without_raw_source).collect(),
            outputs: self.outputs.iter().map(ProvenanceRecord::without_raw_source).collect(),
            ..self.clone()
        }
    }

    /// Serialize to the plain key-value representation
    pub fn to_plain(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Rebuild a process record from the plain representation
    pub fn from_plain(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }
}
