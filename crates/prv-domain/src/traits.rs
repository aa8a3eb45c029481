//! Trait definitions for external interactions
//!
//! The locator is the boundary between the verification core and whatever
//! actually knows where content lives. Implementations live in `prv-locator`.

use crate::{Fingerprint, ProvenanceRecord};
use std::fmt;

/// Where a lookup is performed
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// The local machine
    Local,

    /// A named remote server
    Server(String),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Local => f.write_str("local"),
            Scope::Server(name) => write!(f, "server:{}", name),
        }
    }
}

/// A single lookup request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocateQuery {
    /// Full content checksum
    pub checksum: String,

    /// Checksum over the leading byte range
    pub checksum_prefix: String,

    /// Byte length
    pub size: u64,

    /// Where to look
    pub scope: Scope,
}

impl LocateQuery {
    /// Build a query for the content described by `record`
    pub fn for_record(record: &ProvenanceRecord, scope: Scope) -> Self {
        Self {
            checksum: record.checksum.clone(),
            checksum_prefix: record.checksum_prefix.clone(),
            size: record.size,
            scope,
        }
    }

    /// Fingerprint of the content being looked up
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::new(&self.checksum, self.size)
    }
}

/// Trait for finding content by fingerprint
///
/// Implemented by the infrastructure layer (prv-locator)
///
/// The answer is a path (local scope) or URL (server scope). An empty answer
/// means "not found". Callers trim the answer before testing it, and treat an
/// error the same as "not found".
pub trait Locator {
    /// Error type for lookup failures
    type Error;

    /// Look up the content described by `query`
    fn locate(&self, query: &LocateQuery) -> Result<String, Self::Error>;
}

impl<L: Locator + ?Sized> Locator for &L {
    type Error = L::Error;

    fn locate(&self, query: &LocateQuery) -> Result<String, Self::Error> {
        (**self).locate(query)
    }
}
