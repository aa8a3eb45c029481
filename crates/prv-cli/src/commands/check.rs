//! Check command implementation.

use crate::cli::CheckArgs;
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::Formatter;
use prv_domain::{Locator, ProvenanceRecord};
use prv_locator::CommandLocator;
use prv_store::ResultStore;
use prv_verifier::{RunOutcome, VerificationEvent, Verifier, VerifierConfig, VerifierWorker};
use std::fmt::Display;
use std::sync::Arc;

/// Execute the check command.
pub async fn execute_check(args: CheckArgs, config: &mut Config, formatter: &Formatter) -> Result<()> {
    config.apply_check_args(&args);
    config.validate()?;

    let records = super::load_records(&args.document, &config.extractor)?;
    let locator = CommandLocator::new(config.verifier.locator_program.clone());
    let (outcome, output) = verify(records, locator, config.verifier.clone(), formatter).await?;

    println!("{}", output);
    if formatter.format() == OutputFormat::Table {
        println!("\n{}", formatter.summary(&outcome.metrics));
    }
    if outcome.cancelled {
        eprintln!("{}", formatter.warning("Verification cancelled; results are incomplete"));
    }

    Ok(())
}

/// Verify `records` in the background and render the results.
pub async fn verify<L>(
    records: Vec<ProvenanceRecord>,
    locator: L,
    config: VerifierConfig,
    formatter: &Formatter,
) -> Result<(RunOutcome, String)>
where
    L: Locator + Send + Sync + 'static,
    L::Error: Display,
{
    let servers = config.servers.clone();
    let store = Arc::new(ResultStore::new());
    let verifier = Verifier::new(locator, Arc::clone(&store), config)?;
    let mut worker = VerifierWorker::new(verifier);

    let outcome = worker
        .run(records.clone(), |event| match event {
            VerificationEvent::Progress(fraction) => {
                tracing::debug!("Progress: {:.0}%", fraction * 100.0)
            }
            VerificationEvent::Updated(fingerprint) => tracing::debug!("Updated {}", fingerprint),
            VerificationEvent::Finished { cancelled } => {
                tracing::debug!("Worker finished (cancelled: {})", cancelled)
            }
        })
        .await?;

    let output = formatter.format_results(&records, &servers, &store.snapshot())?;
    Ok((outcome, output))
}
