//! PRV Locator Layer
//!
//! Implementations of the `Locator` trait from `prv-domain`.
//!
//! # Locators
//!
//! - `MockLocator`: Deterministic fake for testing
//! - `CommandLocator`: Runs the external `prv locate` program
//!
//! # Examples
//!
//! ```
//! use prv_domain::traits::Locator;
//! use prv_domain::{LocateQuery, ProvenanceRecord, Scope};
//! use prv_locator::MockLocator;
//!
//! let record = ProvenanceRecord::new("raw", "abc", 10);
//! let mut locator = MockLocator::not_found();
//! locator.add_local(&record.fingerprint(), "/data/raw.mda");
//!
//! let answer = locator.locate(&LocateQuery::for_record(&record, Scope::Local)).unwrap();
//! assert_eq!(answer, "/data/raw.mda");
//! ```

#![warn(missing_docs)]

pub mod command;

use prv_domain::traits::Locator;
use prv_domain::{Fingerprint, LocateQuery, Scope};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

pub use command::CommandLocator;

/// Errors that can occur during a lookup
///
/// The verifier records every one of these as "absent"; they are kept
/// distinct here for logging and metrics.
#[derive(Error, Debug)]
pub enum LocatorError {
    /// The locator program could not be started
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The locator program exited unsuccessfully
    #[error("Locator exited with status {code:?}: {stderr}")]
    ExitStatus {
        /// Exit code, if the process was not killed by a signal
        code: Option<i32>,
        /// Captured standard error
        stderr: String,
    },

    /// Generic error
    #[error("Locator error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum MockAnswer {
    Found(String),
    Fail,
}

/// Mock locator for deterministic testing
///
/// Answers from a table keyed by fingerprint and scope, falling back to a
/// default answer. Every call is recorded. Clones share the table and the
/// call log.
///
/// # Examples
///
/// ```
/// use prv_domain::traits::Locator;
/// use prv_domain::{LocateQuery, ProvenanceRecord, Scope};
/// use prv_locator::MockLocator;
///
/// let record = ProvenanceRecord::new("raw", "abc", 10);
/// let mut locator = MockLocator::not_found();
/// locator.add_server(&record.fingerprint(), "river", "http://river/abc");
/// locator.add_error(&record.fingerprint(), Scope::Server("lake".into()));
///
/// let river = LocateQuery::for_record(&record, Scope::Server("river".into()));
/// let lake = LocateQuery::for_record(&record, Scope::Server("lake".into()));
/// assert_eq!(locator.locate(&river).unwrap(), "http://river/abc");
/// assert!(locator.locate(&lake).is_err());
/// assert_eq!(locator.call_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockLocator {
    default_answer: String,
    answers: Arc<Mutex<HashMap<(Fingerprint, Scope), MockAnswer>>>,
    calls: Arc<Mutex<Vec<LocateQuery>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockLocator {
    /// Create a MockLocator that answers `answer` to every unlisted query
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            default_answer: answer.into(),
            answers: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a MockLocator that finds nothing unless told otherwise
    pub fn not_found() -> Self {
        Self::new("")
    }

    /// Set the answer for a fingerprint in a scope
    pub fn add_answer(&mut self, fingerprint: &Fingerprint, scope: Scope, answer: impl Into<String>) {
        lock(&self.answers).insert((fingerprint.clone(), scope), MockAnswer::Found(answer.into()));
    }

    /// Report `path` as the local copy of `fingerprint`
    pub fn add_local(&mut self, fingerprint: &Fingerprint, path: impl Into<String>) {
        self.add_answer(fingerprint, Scope::Local, path);
    }

    /// Report `url` as the copy of `fingerprint` on `server`
    pub fn add_server(&mut self, fingerprint: &Fingerprint, server: &str, url: impl Into<String>) {
        self.add_answer(fingerprint, Scope::Server(server.to_string()), url);
    }

    /// Configure a lookup to fail
    pub fn add_error(&mut self, fingerprint: &Fingerprint, scope: Scope) {
        lock(&self.answers).insert((fingerprint.clone(), scope), MockAnswer::Fail);
    }

    /// Get the number of times locate was called
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Every query received, in call order
    pub fn calls(&self) -> Vec<LocateQuery> {
        lock(&self.calls).clone()
    }

    /// Forget recorded calls
    pub fn reset_calls(&self) {
        lock(&self.calls).clear();
    }
}

impl Default for MockLocator {
    fn default() -> Self {
        Self::not_found()
    }
}

impl Locator for MockLocator {
    type Error = LocatorError;

    fn locate(&self, query: &LocateQuery) -> Result<String, Self::Error> {
        lock(&self.calls).push(query.clone());

        let key = (query.fingerprint(), query.scope.clone());
        match lock(&self.answers).get(&key) {
            Some(MockAnswer::Found(answer)) => Ok(answer.clone()),
            Some(MockAnswer::Fail) => Err(LocatorError::Other(format!("Mock failure for {}", key.1))),
            None => Ok(self.default_answer.clone()),
        }
    }
}
