//! PRV Verifier
//!
//! Checks where the content of each provenance record can be found: on the
//! local machine and on each configured server.
//!
//! # Overview
//!
//! The Verifier is responsible for:
//! - **Lookups**: asking a [`Locator`](prv_domain::Locator) about every record,
//!   local first, then each server in configured order
//! - **Results**: writing each answer into the shared `ResultStore` as soon as
//!   it arrives
//! - **Notifications**: reporting progress and result updates to an observer
//! - **Cancellation**: stopping cleanly between lookups
//!
//! # Architecture
//!
//! [`Verifier::run`] is synchronous: locators usually spawn a subprocess and
//! block. [`VerifierWorker`] moves a run onto tokio's blocking pool and turns
//! observer callbacks into [`VerificationEvent`] messages.
//!
//! An answer is trimmed; an empty answer means absent, anything else is the
//! path or URL where the content lives. A locator error is recorded as absent
//! and counted in [`VerificationMetrics::locator_failures`].
//!
//! # Usage
//!
//! ## Foreground Run
//!
//! ```
//! use prv_domain::{Availability, ProvenanceRecord};
//! use prv_locator::MockLocator;
//! use prv_store::ResultStore;
//! use prv_verifier::{CancellationToken, FnObserver, Verifier, VerifierConfig};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let record = ProvenanceRecord::new("raw", "abc", 10);
//! let mut locator = MockLocator::not_found();
//! locator.add_local(&record.fingerprint(), "/data/raw.mda");
//!
//! let store = Arc::new(ResultStore::new());
//! let config = VerifierConfig::default().with_servers(["serverA", "serverB"]);
//! let verifier = Verifier::new(locator, Arc::clone(&store), config)?;
//!
//! let mut observer = FnObserver::new(|fraction| println!("{:.0}%", fraction * 100.0), |_| {});
//! let outcome = verifier.run(&[record.clone()], &mut observer, &CancellationToken::new());
//! println!("{}", outcome.metrics.summary());
//!
//! let result = store.get(&record.fingerprint()).unwrap();
//! assert_eq!(result.local_status, Availability::Present);
//! assert_eq!(result.server_availability("serverA"), Availability::Absent);
//! # Ok(())
//! # }
//! ```
//!
//! ## Background Worker
//!
//! ```no_run
//! use prv_locator::CommandLocator;
//! use prv_store::ResultStore;
//! use prv_verifier::{Verifier, VerifierConfig, VerifierWorker};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let records = prv_extractor::extract("session", &serde_json::json!({}));
//!     let config = VerifierConfig::default().with_servers(["river"]);
//!     let verifier = Verifier::new(CommandLocator::default(), Arc::new(ResultStore::new()), config)?;
//!     let mut worker = VerifierWorker::new(verifier);
//!
//!     // Runs until done or Ctrl+C
//!     let outcome = worker.run(records, |event| println!("{:?}", event)).await?;
//!     println!("{}", outcome.metrics.summary());
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! [verifier]
//! servers = ["river", "lake"]
//! locator_program = "prv"
//! deduplicate = false
//! ```

#![warn(missing_docs)]

mod cancel;
mod config;
mod error;
mod metrics;
mod observer;
mod verifier;
mod worker;

pub use cancel::CancellationToken;
pub use config::VerifierConfig;
pub use error::VerifierError;
pub use metrics::VerificationMetrics;
pub use observer::{FnObserver, NoopObserver, VerificationEvent, VerificationObserver};
pub use verifier::{RunOutcome, Verifier};
pub use worker::VerifierWorker;
