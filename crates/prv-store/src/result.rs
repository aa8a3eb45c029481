//! Per-fingerprint verification results

use prv_domain::Availability;
use serde::Serialize;
use std::collections::BTreeMap;

/// Availability of content on one server
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ServerAvailability {
    /// URL reported by the locator (empty when absent)
    pub url: String,

    /// Lookup status
    pub status: Availability,
}

/// Everything known about one fingerprint
///
/// A fresh result is all-unknown. Server entries appear the first time that
/// server is checked.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct VerificationResult {
    /// Local path reported by the locator (empty means no known local copy)
    pub local_path: String,

    /// Local lookup status
    pub local_status: Availability,

    /// Per-server lookup results, keyed by server name
    pub server_status: BTreeMap<String, ServerAvailability>,
}

impl VerificationResult {
    /// Result for the named server, if it has been checked
    pub fn server(&self, name: &str) -> Option<&ServerAvailability> {
        self.server_status.get(name)
    }

    /// Status for the named server, `Unknown` if not yet checked
    pub fn server_availability(&self, name: &str) -> Availability {
        self.server(name).map(|s| s.status).unwrap_or_default()
    }

    /// True if the content was found locally or on any server
    pub fn is_available_anywhere(&self) -> bool {
        self.local_status == Availability::Present
            || self
                .server_status
                .values()
                .any(|s| s.status == Availability::Present)
    }
}
