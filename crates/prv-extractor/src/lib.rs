//! PRV Extractor
//!
//! Finds provenance records embedded anywhere in a JSON document tree.
//!
//! # Overview
//!
//! Pipeline outputs, session files and result bundles carry provenance objects
//! at arbitrary depths. The extractor walks the tree and flattens it into an
//! ordered list of [`ProvenanceRecord`](prv_domain::ProvenanceRecord)s with
//! path-derived labels, ready for verification.
//!
//! # Architecture
//!
//! ```text
//! JSON text → serde_json::Value → TreeExtractor → Vec<ProvenanceRecord> → Verifier
//! ```
//!
//! # Labelling
//!
//! - an object's children are labelled by key
//! - a child under the `data` wrapper key keeps its parent's label
//! - an array element is labelled `parent[index]`
//!
//! # Example Usage
//!
//! ```no_run
//! use prv_extractor::{ExtractorConfig, TreeExtractor};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = TreeExtractor::new(ExtractorConfig::default())?;
//! let records = extractor.extract_path("sorting_results.json")?;
//!
//! for record in &records {
//!     println!("{} -> {}", record.label, record.fingerprint());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
pub mod parser;


pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::{extract, TreeExtractor};
