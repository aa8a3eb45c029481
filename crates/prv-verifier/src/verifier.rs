//! Core verification loop

use crate::{CancellationToken, VerificationMetrics, VerificationObserver, VerifierConfig, VerifierError};
use prv_domain::traits::Locator;
use prv_domain::{Availability, Fingerprint, LocateQuery, ProvenanceRecord, Scope};
use prv_store::ResultStore;
use std::collections::HashSet;
use std::fmt::Display;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Counters collected during the run
    pub metrics: VerificationMetrics,

    /// True if the run stopped early because it was cancelled
    pub cancelled: bool,
}

/// Checks where each record's content is available
///
/// For every record, in order: the local machine first, then each configured
/// server in order. Results land in the shared [`ResultStore`] as each lookup
/// completes.
///
/// # Examples
///
/// ```
/// use prv_domain::{Availability, ProvenanceRecord};
/// use prv_locator::MockLocator;
/// use prv_store::ResultStore;
/// use prv_verifier::{CancellationToken, NoopObserver, Verifier, VerifierConfig};
/// use std::sync::Arc;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let record = ProvenanceRecord::new("raw", "abc", 10);
/// let mut locator = MockLocator::not_found();
/// locator.add_local(&record.fingerprint(), "/data/raw.mda");
///
/// let store = Arc::new(ResultStore::new());
/// let config = VerifierConfig::default().with_servers(["river"]);
/// let verifier = Verifier::new(locator, Arc::clone(&store), config)?;
///
/// let outcome = verifier.run(&[record.clone()], &mut NoopObserver, &CancellationToken::new());
/// assert!(!outcome.cancelled);
///
/// let result = store.get(&record.fingerprint()).unwrap();
/// assert_eq!(result.local_status, Availability::Present);
/// assert_eq!(result.server_availability("river"), Availability::Absent);
/// # Ok(())
/// # }
/// ```
pub struct Verifier<L> {
    locator: L,
    store: Arc<ResultStore>,
    config: VerifierConfig,
}

impl<L> Verifier<L>
where
    L: Locator,
    L::Error: Display,
{
    /// Create a new Verifier writing into `store`
    pub fn new(locator: L, store: Arc<ResultStore>, config: VerifierConfig) -> Result<Self, VerifierError> {
        config.validate().map_err(VerifierError::Config)?;
        Ok(Self { locator, store, config })
    }

    /// Get the configuration
    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Get the shared result store
    pub fn store(&self) -> &Arc<ResultStore> {
        &self.store
    }

    /// Get the locator
    pub fn locator(&self) -> &L {
        &self.locator
    }

    /// Verify every record, in order
    ///
    /// Clears the store first: results never carry over between runs.
    /// Cancellation is checked before each local lookup and before each server
    /// lookup; once seen, no further lookups are issued and the results
    /// written so far stay in the store.
    pub fn run<O>(&self, records: &[ProvenanceRecord], observer: &mut O, cancel: &CancellationToken) -> RunOutcome
    where
        O: VerificationObserver + ?Sized,
    {
        let start = Instant::now();
        let total = records.len();
        let mut metrics = VerificationMetrics::new(total);
        let mut seen: HashSet<Fingerprint> = HashSet::new();

        self.store.clear();
        info!(
            "Verification started: {} record(s), {} server(s)",
            total,
            self.config.servers.len()
        );

        let mut cancelled = false;
        'records: for (index, record) in records.iter().enumerate() {
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }

            let fingerprint = record.fingerprint();
            let name = record.file_name();

            if self.config.deduplicate && !seen.insert(fingerprint.clone()) {
                debug!("Skipping {} ({}): already checked", record.label, fingerprint);
                metrics.records_skipped += 1;
                observer.on_progress(progress(index, total));
                continue;
            }

            self.store.get_or_create(&fingerprint);

            debug!("check if on local disk {} {}", name, record.size);
            let path = self.lookup(record, Scope::Local, &mut metrics);
            let status = Availability::from_answer(&path);
            self.store.set_local(&fingerprint, &path, status);
            metrics.record_local(status);
            observer.on_update(&fingerprint);
            observer.on_progress(progress(index, total));

            for server in &self.config.servers {
                if cancel.is_cancelled() {
                    cancelled = true;
                    break 'records;
                }

                debug!("check if on server {} {}", name, server);
                let url = self.lookup(record, Scope::Server(server.clone()), &mut metrics);
                let status = Availability::from_answer(&url);
                self.store.set_server(&fingerprint, server, &url, status);
                metrics.record_server(server, status);
                observer.on_update(&fingerprint);
            }

            metrics.records_checked += 1;
        }

        metrics.runtime_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        if cancelled {
            info!(
                "Verification cancelled after {} of {} record(s)",
                metrics.records_checked, total
            );
        } else {
            info!(
                "Verification finished: {} checked, {} local hit(s), {} server hit(s), {} locator failure(s)",
                metrics.records_checked,
                metrics.local_present,
                metrics.total_server_present(),
                metrics.locator_failures
            );
        }

        RunOutcome { metrics, cancelled }
    }

    /// Ask the locator, folding every failure into "not found"
    fn lookup(&self, record: &ProvenanceRecord, scope: Scope, metrics: &mut VerificationMetrics) -> String {
        let query = LocateQuery::for_record(record, scope);
        metrics.locator_calls += 1;

        match self.locator.locate(&query) {
            Ok(answer) => answer.trim().to_string(),
            Err(e) => {
                metrics.locator_failures += 1;
                warn!("Lookup of {} ({}) failed: {}", record.label, query.scope, e);
                String::new()
            }
        }
    }
}

/// Progress is reported halfway through each record
fn progress(index: usize, total: usize) -> f64 {
    (index as f64 + 0.5) / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FnObserver, NoopObserver};
    use prv_locator::MockLocator;

    fn record(label: &str, checksum: &str) -> ProvenanceRecord {
        ProvenanceRecord::new(label, checksum, 100).with_original_path(format!("/data/{}.mda", label))
    }

    fn verifier(locator: MockLocator, servers: &[&str]) -> Verifier<MockLocator> {
        let config = VerifierConfig::default().with_servers(servers.iter().copied());
        Verifier::new(locator, Arc::new(ResultStore::new()), config).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = VerifierConfig::default().with_servers(["a", "a"]);
        let result = Verifier::new(MockLocator::default(), Arc::new(ResultStore::new()), config);
        assert!(matches!(result, Err(VerifierError::Config(_))));
    }

    #[test]
    fn test_lookup_order() {
        let locator = MockLocator::not_found();
        let verifier = verifier(locator.clone(), &["river", "lake"]);
        let records = vec![record("a", "aaa"), record("b", "bbb")];

        verifier.run(&records, &mut NoopObserver, &CancellationToken::new());

        let calls: Vec<(String, Scope)> = locator
            .calls()
            .into_iter()
            .map(|q| (q.checksum, q.scope))
            .collect();
        assert_eq!(
            calls,
            vec![
                ("aaa".to_string(), Scope::Local),
                ("aaa".to_string(), Scope::Server("river".into())),
                ("aaa".to_string(), Scope::Server("lake".into())),
                ("bbb".to_string(), Scope::Local),
                ("bbb".to_string(), Scope::Server("river".into())),
                ("bbb".to_string(), Scope::Server("lake".into())),
            ]
        );
    }

    #[test]
    fn test_answers_are_trimmed() {
        let r = record("a", "aaa");
        let mut locator = MockLocator::not_found();
        locator.add_local(&r.fingerprint(), "  /data/a.mda\n");
        locator.add_server(&r.fingerprint(), "river", " \n\t ");
        let verifier = verifier(locator, &["river"]);

        verifier.run(&[r.clone()], &mut NoopObserver, &CancellationToken::new());

        let result = verifier.store().get(&r.fingerprint()).unwrap();
        assert_eq!(result.local_path, "/data/a.mda");
        assert_eq!(result.local_status, Availability::Present);
        assert_eq!(result.server_availability("river"), Availability::Absent);
        assert_eq!(result.server("river").unwrap().url, "");
    }

    #[test]
    fn test_locator_failure_is_absent() {
        let r = record("a", "aaa");
        let mut locator = MockLocator::new("/found/everywhere");
        locator.add_error(&r.fingerprint(), Scope::Local);
        let verifier = verifier(locator, &["river"]);

        let outcome = verifier.run(&[r.clone()], &mut NoopObserver, &CancellationToken::new());

        let result = verifier.store().get(&r.fingerprint()).unwrap();
        assert_eq!(result.local_status, Availability::Absent);
        assert_eq!(result.local_path, "");
        assert_eq!(result.server_availability("river"), Availability::Present);
        assert_eq!(outcome.metrics.locator_failures, 1);
        assert_eq!(outcome.metrics.locator_calls, 2);
        assert!(!outcome.cancelled);
    }

    #[test]
    fn test_progress_and_update_counts() {
        let verifier = verifier(MockLocator::not_found(), &["river", "lake"]);
        let records = vec![record("a", "aaa"), record("b", "bbb"), record("c", "ccc"), record("d", "ddd")];

        let mut progress = Vec::new();
        let mut updates = 0;
        let mut observer = FnObserver::new(|f| progress.push(f), |_| updates += 1);
        verifier.run(&records, &mut observer, &CancellationToken::new());
        drop(observer);

        assert_eq!(progress, vec![0.125, 0.375, 0.625, 0.875]);
        assert_eq!(updates, 4 * 3);
    }

    #[test]
    fn test_cancel_before_start() {
        let locator = MockLocator::not_found();
        let verifier = verifier(locator.clone(), &["river"]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let outcome = verifier.run(&[record("a", "aaa")], &mut NoopObserver, &cancel);

        assert!(outcome.cancelled);
        assert_eq!(locator.call_count(), 0);
        assert!(verifier.store().is_empty());
    }

    #[test]
    fn test_cancel_between_servers() {
        let locator = MockLocator::not_found();
        let verifier = verifier(locator.clone(), &["river", "lake"]);
        let cancel = CancellationToken::new();
        let r = record("a", "aaa");

        // Cancel as soon as the first server result lands
        let mut updates = 0;
        let token = cancel.clone();
        let mut observer = FnObserver::new(
            |_| {},
            |_| {
                updates += 1;
                if updates == 2 {
                    token.cancel();
                }
            },
        );
        let outcome = verifier.run(&[r.clone()], &mut observer, &cancel);

        assert!(outcome.cancelled);
        assert_eq!(locator.call_count(), 2);
        let result = verifier.store().get(&r.fingerprint()).unwrap();
        assert_eq!(result.server_availability("river"), Availability::Absent);
        assert!(result.server("lake").is_none());
        assert_eq!(outcome.metrics.records_checked, 0);
    }

    #[test]
    fn test_duplicate_fingerprints_checked_twice_recorded_once() {
        let locator = MockLocator::not_found();
        let verifier = verifier(locator.clone(), &["river"]);
        let records = vec![record("first", "same"), record("second", "same")];

        let outcome = verifier.run(&records, &mut NoopObserver, &CancellationToken::new());

        assert_eq!(locator.call_count(), 4);
        assert_eq!(verifier.store().len(), 1);
        assert_eq!(outcome.metrics.records_checked, 2);
    }

    #[test]
    fn test_deduplicate_skips_repeat_lookups() {
        let locator = MockLocator::not_found();
        let config = VerifierConfig {
            deduplicate: true,
            ..VerifierConfig::default().with_servers(["river"])
        };
        let verifier = Verifier::new(locator.clone(), Arc::new(ResultStore::new()), config).unwrap();
        let records = vec![record("first", "same"), record("second", "same"), record("third", "other")];

        let mut progress = Vec::new();
        let mut observer = FnObserver::new(|f| progress.push(f), |_| {});
        let outcome = verifier.run(&records, &mut observer, &CancellationToken::new());
        drop(observer);

        assert_eq!(locator.call_count(), 4);
        assert_eq!(verifier.store().len(), 2);
        assert_eq!(outcome.metrics.records_skipped, 1);
        assert_eq!(progress.len(), 3);
    }

    #[test]
    fn test_new_run_discards_previous_results() {
        let verifier = verifier(MockLocator::not_found(), &[]);
        verifier.run(&[record("a", "aaa")], &mut NoopObserver, &CancellationToken::new());
        verifier.run(&[record("b", "bbb")], &mut NoopObserver, &CancellationToken::new());

        assert_eq!(verifier.store().len(), 1);
        assert!(verifier.store().contains(&record("b", "bbb").fingerprint()));
    }

    #[test]
    fn test_empty_run() {
        let verifier = verifier(MockLocator::not_found(), &["river"]);
        let outcome = verifier.run(&[], &mut NoopObserver, &CancellationToken::new());
        assert!(!outcome.cancelled);
        assert_eq!(outcome.metrics.records_total, 0);
        assert!(verifier.store().is_empty());
    }
}
