//! Background worker for verification runs

use crate::{CancellationToken, RunOutcome, VerificationEvent, Verifier, VerifierError};
use prv_domain::traits::Locator;
use prv_domain::ProvenanceRecord;
use prv_store::ResultStore;
use std::fmt::Display;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;

struct ActiveRun {
    cancel: CancellationToken,
    task: JoinHandle<RunOutcome>,
}

/// Runs verifications off the caller's task, one at a time
///
/// Locator lookups block, so each run goes to `spawn_blocking`. Starting a
/// new run cancels and awaits the previous one first; dropping the worker
/// cancels whatever is still running.
///
/// # Examples
///
/// ```
/// use prv_domain::ProvenanceRecord;
/// use prv_locator::MockLocator;
/// use prv_store::ResultStore;
/// use prv_verifier::{VerificationEvent, Verifier, VerifierConfig, VerifierWorker};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = Arc::new(ResultStore::new());
///     let verifier = Verifier::new(MockLocator::not_found(), store, VerifierConfig::default())?;
///     let mut worker = VerifierWorker::new(verifier);
///
///     let mut events = worker.start(vec![ProvenanceRecord::new("raw", "abc", 10)]).await?;
///     while let Some(event) = events.recv().await {
///         if let VerificationEvent::Finished { cancelled } = event {
///             assert!(!cancelled);
///         }
///     }
///
///     let outcome = worker.wait().await?.unwrap();
///     assert_eq!(outcome.metrics.records_checked, 1);
///     Ok(())
/// }
/// ```
pub struct VerifierWorker<L> {
    verifier: Arc<Verifier<L>>,
    active: Option<ActiveRun>,
}

impl<L> VerifierWorker<L>
where
    L: Locator + Send + Sync + 'static,
    L::Error: Display,
{
    /// Create a new worker around a verifier
    pub fn new(verifier: Verifier<L>) -> Self {
        Self {
            verifier: Arc::new(verifier),
            active: None,
        }
    }

    /// Get the verifier
    pub fn verifier(&self) -> &Verifier<L> {
        &self.verifier
    }

    /// Get the store the runs write into
    pub fn store(&self) -> &Arc<ResultStore> {
        self.verifier.store()
    }

    /// Start verifying `records` in the background
    ///
    /// Returns the event stream of the new run. It ends with
    /// [`VerificationEvent::Finished`] and closes when the run's task exits.
    pub async fn start(
        &mut self,
        records: Vec<ProvenanceRecord>,
    ) -> Result<UnboundedReceiver<VerificationEvent>, VerifierError> {
        if let Some(previous) = self.stop().await? {
            tracing::debug!(
                "Previous run stopped after {} record(s)",
                previous.metrics.records_checked
            );
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let verifier = Arc::clone(&self.verifier);

        let task = tokio::task::spawn_blocking(move || {
            let mut tx = tx;
            let outcome = verifier.run(&records, &mut tx, &token);
            let _ = tx.send(VerificationEvent::Finished {
                cancelled: outcome.cancelled,
            });
            outcome
        });

        self.active = Some(ActiveRun { cancel, task });
        Ok(rx)
    }

    /// Request cancellation of the active run, if any
    pub fn cancel(&self) {
        if let Some(run) = &self.active {
            run.cancel.cancel();
        }
    }

    /// Check if a run is still in progress
    pub fn is_running(&self) -> bool {
        self.active.as_ref().is_some_and(|run| !run.task.is_finished())
    }

    /// Wait for the active run to end
    ///
    /// Returns `None` if no run was started since the last wait.
    pub async fn wait(&mut self) -> Result<Option<RunOutcome>, VerifierError> {
        match self.active.take() {
            None => Ok(None),
            Some(run) => run
                .task
                .await
                .map(Some)
                .map_err(|e| VerifierError::Worker(e.to_string())),
        }
    }

    /// Cancel the active run and wait for it to end
    pub async fn stop(&mut self) -> Result<Option<RunOutcome>, VerifierError> {
        self.cancel();
        self.wait().await
    }

    /// Run to completion in the foreground, forwarding every event
    ///
    /// A shutdown signal (Ctrl+C) cancels the run; the results gathered up to
    /// that point stay in the store and the outcome reports `cancelled`.
    pub async fn run<F>(&mut self, records: Vec<ProvenanceRecord>, mut on_event: F) -> Result<RunOutcome, VerifierError>
    where
        F: FnMut(&VerificationEvent),
    {
        let mut events = self.start(records).await?;
        let mut interrupted = false;

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => {
                        on_event(&event);
                        if matches!(event, VerificationEvent::Finished { .. }) {
                            break;
                        }
                    }
                    None => break,
                },
                Ok(()) = tokio::signal::ctrl_c(), if !interrupted => {
                    tracing::info!("Shutdown signal received, cancelling verification");
                    interrupted = true;
                    self.cancel();
                }
            }
        }

        self.wait()
            .await?
            .ok_or_else(|| VerifierError::Worker("run ended without an outcome".to_string()))
    }
}

impl<L> Drop for VerifierWorker<L> {
    fn drop(&mut self) {
        if let Some(run) = &self.active {
            run.cancel.cancel();
        }
    }
}
