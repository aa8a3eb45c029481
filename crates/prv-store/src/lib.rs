//! PRV Result Store
//!
//! Shared, incrementally built mapping from fingerprint to verification result.
//!
//! # Architecture
//!
//! - A single `RwLock` guards the whole map; the store is shared as
//!   `Arc<ResultStore>` between the verification worker (writer) and any
//!   number of observers (readers)
//! - Every string field is written together with its status under the same
//!   write lock, so a reader never sees a URL without its matching status
//! - Readers get owned copies ([`VerificationResult`] clones or a
//!   [`StoreSnapshot`]) and never hold the lock while iterating
//!
//! # Examples
//!
//! ```
//! use prv_domain::{Availability, Fingerprint};
//! use prv_store::ResultStore;
//!
//! let store = ResultStore::new();
//! let fp = Fingerprint::new("abc", 10);
//!
//! store.set_local(&fp, "/data/abc.mda", Availability::Present);
//! store.set_server(&fp, "river", "", Availability::Absent);
//!
//! let result = store.get(&fp).unwrap();
//! assert_eq!(result.local_status, Availability::Present);
//! assert_eq!(result.server_availability("river"), Availability::Absent);
//! ```

#![warn(missing_docs)]

mod result;

pub use result::{ServerAvailability, VerificationResult};

use prv_domain::{Availability, Fingerprint};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Concurrency-safe store of verification results keyed by fingerprint
///
/// # Thread Safety
///
/// All methods take `&self`; share the store behind an `Arc`. A panic in a
/// writer does not wedge the store: the lock is recovered on the next access.
#[derive(Debug, Default)]
pub struct ResultStore {
    results: RwLock<HashMap<Fingerprint, VerificationResult>>,
}

impl ResultStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<Fingerprint, VerificationResult>> {
        self.results.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<Fingerprint, VerificationResult>> {
        self.results.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the entry for `fingerprint`, creating an all-unknown one if needed
    ///
    /// Creation happens under the write lock, so concurrent callers never
    /// produce duplicate entries.
    pub fn get_or_create(&self, fingerprint: &Fingerprint) -> VerificationResult {
        self.write().entry(fingerprint.clone()).or_default().clone()
    }

    /// Return a copy of the entry for `fingerprint`, if any
    pub fn get(&self, fingerprint: &Fingerprint) -> Option<VerificationResult> {
        self.read().get(fingerprint).cloned()
    }

    /// True if an entry exists for `fingerprint`
    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.read().contains_key(fingerprint)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// True if the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Record the local lookup result
    pub fn set_local(&self, fingerprint: &Fingerprint, path: &str, status: Availability) {
        let mut results = self.write();
        let entry = results.entry(fingerprint.clone()).or_default();
        entry.local_path = path.to_string();
        entry.local_status = status;
    }

    /// Record the lookup result for one server
    pub fn set_server(&self, fingerprint: &Fingerprint, server_name: &str, url: &str, status: Availability) {
        let mut results = self.write();
        let entry = results.entry(fingerprint.clone()).or_default();
        entry.server_status.insert(
            server_name.to_string(),
            ServerAvailability {
                url: url.to_string(),
                status,
            },
        );
    }

    /// Owned copy of every entry, safe to read while the worker keeps writing
    pub fn snapshot(&self) -> StoreSnapshot {
        let results = self.read();
        StoreSnapshot {
            results: results
                .iter()
                .map(|(fp, result)| (fp.clone(), result.clone()))
                .collect(),
        }
    }

    /// Remove every entry (start of a new run only)
    pub fn clear(&self) {
        let mut results = self.write();
        debug!("Clearing {} verification result(s)", results.len());
        results.clear();
    }
}

/// Point-in-time copy of a [`ResultStore`], ordered by fingerprint
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StoreSnapshot {
    results: BTreeMap<Fingerprint, VerificationResult>,
}

impl StoreSnapshot {
    /// Result for `fingerprint`, if present
    pub fn get(&self, fingerprint: &Fingerprint) -> Option<&VerificationResult> {
        self.results.get(fingerprint)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// True if the snapshot holds no entries
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Iterate entries in fingerprint order
    pub fn iter(&self) -> impl Iterator<Item = (&Fingerprint, &VerificationResult)> {
        self.results.iter()
    }

    /// Render as a pretty-printed JSON object keyed by fingerprint
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
