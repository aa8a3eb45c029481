//! Metrics collection for verification runs

use prv_domain::Availability;
use std::collections::{BTreeMap, BTreeSet};

/// Counters collected during one verification run
///
/// `locator_failures` is the only place where "the locator could not answer"
/// is told apart from "the locator found nothing"; the result store records
/// both as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationMetrics {
    /// Records handed to the run
    pub records_total: usize,

    /// Records whose local and server checks all completed
    pub records_checked: usize,

    /// Records skipped because their fingerprint was already checked
    pub records_skipped: usize,

    /// Locator invocations
    pub locator_calls: usize,

    /// Locator invocations that returned an error
    pub locator_failures: usize,

    /// Local lookups that found the content
    pub local_present: usize,

    /// Local lookups that did not find the content
    pub local_absent: usize,

    /// Server lookups that found the content, per server
    pub server_present: BTreeMap<String, usize>,

    /// Server lookups that did not find the content, per server
    pub server_absent: BTreeMap<String, usize>,

    /// Wall-clock duration of the run in milliseconds
    pub runtime_ms: u64,
}

impl VerificationMetrics {
    /// Create new empty metrics for a run over `records_total` records
    pub fn new(records_total: usize) -> Self {
        Self {
            records_total,
            ..Default::default()
        }
    }

    /// Record a completed local lookup
    pub fn record_local(&mut self, status: Availability) {
        match status {
            Availability::Present => self.local_present += 1,
            Availability::Absent => self.local_absent += 1,
            Availability::Unknown => {}
        }
    }

    /// Record a completed server lookup
    pub fn record_server(&mut self, server: &str, status: Availability) {
        let counts = match status {
            Availability::Present => &mut self.server_present,
            Availability::Absent => &mut self.server_absent,
            Availability::Unknown => return,
        };
        *counts.entry(server.to_string()).or_insert(0) += 1;
    }

    /// Get total server hits across all servers
    pub fn total_server_present(&self) -> usize {
        self.server_present.values().sum()
    }

    /// Get total server misses across all servers
    pub fn total_server_absent(&self) -> usize {
        self.server_absent.values().sum()
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Verification Summary".to_string(),
            "====================".to_string(),
            format!("Records: {} checked, {} skipped, {} total", self.records_checked, self.records_skipped, self.records_total),
            format!("Local: {} present, {} absent", self.local_present, self.local_absent),
            format!("Locator calls: {} ({} failed)", self.locator_calls, self.locator_failures),
            format!("Runtime: {}ms", self.runtime_ms),
        ];

        let servers: BTreeSet<&String> = self
            .server_present
            .keys()
            .chain(self.server_absent.keys())
            .collect();
        if !servers.is_empty() {
            lines.push(String::new());
            lines.push("Servers:".to_string());
            for server in servers {
                lines.push(format!(
                    "  {}: {} present, {} absent",
                    server,
                    self.server_present.get(server).copied().unwrap_or(0),
                    self.server_absent.get(server).copied().unwrap_or(0)
                ));
            }
        }

        lines.join("\n")
    }
}
