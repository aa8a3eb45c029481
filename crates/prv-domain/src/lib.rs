//! PRV Domain Layer
//!
//! Core value objects shared by every other crate in the workspace.
//!
//! ## Key Concepts
//!
//! - **Provenance record**: one piece of content (checksum, size, path) plus
//!   the lineage of processes that produced or consumed it
//! - **Fingerprint**: `checksum:size`, the identity of content regardless of
//!   label or path
//! - **Availability**: tri-state result of a lookup (present, absent, unknown)
//! - **Locator**: the external collaborator that answers "where can this
//!   content be found" for the local machine or a named server
//!
//! ## Architecture
//!
//! Only `serde`/`serde_json` are pulled in, because records carry opaque JSON
//! parameters and a retained copy of their source object. Infrastructure
//! (subprocess locators, shared stores, workers) lives in other crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod availability;
pub mod fingerprint;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use availability::Availability;
pub use fingerprint::Fingerprint;
pub use record::{ProcessRecord, ProvenanceRecord};
pub use traits::{LocateQuery, Locator, Scope};
