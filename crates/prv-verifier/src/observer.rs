//! Progress and update notifications

use prv_domain::Fingerprint;
use tokio::sync::mpsc::UnboundedSender;

/// Receives notifications from a running verification
///
/// `on_update` fires after every write to the result store; `on_progress`
/// fires once per record with a fraction in `[0, 1)`.
pub trait VerificationObserver {
    /// Fraction of the run completed
    fn on_progress(&mut self, _fraction: f64) {}

    /// The result for `fingerprint` changed
    fn on_update(&mut self, _fingerprint: &Fingerprint) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl VerificationObserver for NoopObserver {}

/// Observer built from a pair of closures
pub struct FnObserver<P, U> {
    on_progress: P,
    on_update: U,
}

impl<P, U> FnObserver<P, U>
where
    P: FnMut(f64),
    U: FnMut(&Fingerprint),
{
    /// Wrap the two callbacks
    pub fn new(on_progress: P, on_update: U) -> Self {
        Self {
            on_progress,
            on_update,
        }
    }
}

impl<P, U> VerificationObserver for FnObserver<P, U>
where
    P: FnMut(f64),
    U: FnMut(&Fingerprint),
{
    fn on_progress(&mut self, fraction: f64) {
        (self.on_progress)(fraction)
    }

    fn on_update(&mut self, fingerprint: &Fingerprint) {
        (self.on_update)(fingerprint)
    }
}

/// Message sent from the background worker to observers
#[derive(Debug, Clone, PartialEq)]
pub enum VerificationEvent {
    /// Fraction of the run completed
    Progress(f64),

    /// The result for this fingerprint changed
    Updated(Fingerprint),

    /// The run ended; no further events follow
    Finished {
        /// True if the run stopped because it was cancelled
        cancelled: bool,
    },
}

impl VerificationObserver for UnboundedSender<VerificationEvent> {
    fn on_progress(&mut self, fraction: f64) {
        // A dropped receiver just means nobody is watching
        let _ = self.send(VerificationEvent::Progress(fraction));
    }

    fn on_update(&mut self, fingerprint: &Fingerprint) {
        let _ = self.send(VerificationEvent::Updated(fingerprint.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_fn_observer() {
        let mut progress = Vec::new();
        let mut updates = 0;
        {
            let mut observer = FnObserver::new(|f| progress.push(f), |_| updates += 1);
            observer.on_progress(0.5);
            observer.on_update(&Fingerprint::new("a", 1));
            observer.on_update(&Fingerprint::new("a", 1));
        }
        assert_eq!(progress, vec![0.5]);
        assert_eq!(updates, 2);
    }

    #[test]
    fn test_channel_observer() {
        let (mut tx, mut rx) = mpsc::unbounded_channel();
        tx.on_progress(0.25);
        tx.on_update(&Fingerprint::new("a", 1));

        assert_eq!(rx.try_recv().unwrap(), VerificationEvent::Progress(0.25));
        assert_eq!(
            rx.try_recv().unwrap(),
            VerificationEvent::Updated(Fingerprint::new("a", 1))
        );
    }

    #[test]
    fn test_channel_observer_without_receiver() {
        let (mut tx, rx) = mpsc::unbounded_channel::<VerificationEvent>();
        drop(rx);
        tx.on_progress(0.5);
    }
}
