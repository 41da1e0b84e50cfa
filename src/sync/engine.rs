//! The sync engine: one full read-all-then-write-each pass.

use tracing::Instrument;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::secrets::{
    fetch_all, AzureKeyVaultClient, Secret, SecretDestination, SecretSource, VaultKvClient,
};

use super::outcome::{PassSummary, TransferOutcome};

/// Decide whether a single secret may be written, and write it if so.
///
/// The decision is driven by the existence probe and the overwrite policy:
/// a secret the probe does not confirm as present is always written; a
/// confirmed-present secret is written only when `overwrite` is enabled.
/// Every failure is folded into the returned outcome; this function never
/// errors and never panics.
pub async fn write_if_allowed<D>(destination: &D, secret: &Secret, overwrite: bool) -> TransferOutcome
where
    D: SecretDestination + ?Sized,
{
    let exists = destination.secret_exists(&secret.name).await;
    if exists && !overwrite {
        return TransferOutcome::SkippedExisting { name: secret.name.clone() };
    }

    match destination.write_secret(&secret.name, &secret.value).await {
        Ok(()) => TransferOutcome::Written { name: secret.name.clone() },
        Err(err) => TransferOutcome::WriteFailed { name: secret.name.clone(), reason: err.to_string() },
    }
}

fn log_outcome(outcome: &TransferOutcome) {
    match outcome {
        TransferOutcome::Written { name } => {
            tracing::info!(name = %name, "Wrote secret to destination");
        }
        TransferOutcome::SkippedExisting { name } => {
            tracing::info!(name = %name, "Secret already exists at destination, skipping");
        }
        TransferOutcome::ReadFailed { name, reason } => {
            tracing::warn!(name = %name, reason = %reason, "Failed to read secret from source");
        }
        TransferOutcome::WriteFailed { name, reason } => {
            tracing::warn!(name = %name, reason = %reason, "Failed to write secret to destination");
        }
    }
}

/// Run one pass over already-validated store clients.
///
/// Reads the full batch from the source, then processes each secret strictly
/// sequentially in enumeration order, one in-flight request at a time. Each
/// outcome is reported as one log line; the summary closes with the total
/// retrieved count.
pub async fn run_pass<S, D>(source: &S, destination: &D, overwrite: bool) -> Result<PassSummary>
where
    S: SecretSource + ?Sized,
    D: SecretDestination + ?Sized,
{
    let batch = fetch_all(source).await?;

    let mut summary = PassSummary { retrieved: batch.len(), ..Default::default() };

    for failure in &batch.read_failures {
        let outcome = TransferOutcome::ReadFailed {
            name: failure.name.clone(),
            reason: failure.reason.clone(),
        };
        log_outcome(&outcome);
        summary.record(&outcome);
    }

    for secret in &batch.secrets {
        let outcome = write_if_allowed(destination, secret, overwrite).await;
        log_outcome(&outcome);
        summary.record(&outcome);
    }

    tracing::info!(
        retrieved = summary.retrieved,
        written = summary.written,
        skipped_existing = summary.skipped_existing,
        read_failed = summary.read_failed,
        write_failed = summary.write_failed,
        "Sync pass complete: retrieved {} secrets",
        summary.retrieved
    );

    Ok(summary)
}

/// Orchestrates sync passes against the configured stores.
///
/// Each pass validates the configuration, builds fresh store clients, and
/// runs [`run_pass`]. Only structural misconfiguration (a malformed
/// destination address, an empty source URL) aborts a pass, and only before
/// any secret-level work begins.
pub struct SyncEngine {
    config: AppConfig,
}

impl SyncEngine {
    /// Create an engine over the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// The configuration this engine runs with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run exactly one sync pass.
    pub async fn run_once(&self) -> Result<PassSummary> {
        let span = tracing::info_span!("sync_pass", pass_id = %Uuid::new_v4());
        async {
            // Structural validation happens before any store I/O.
            self.config.validate()?;
            let destination = VaultKvClient::new(self.config.destination.clone())?;
            let source = AzureKeyVaultClient::new(self.config.source.clone())?;

            run_pass(&source, &destination, self.config.sync.overwrite).await
        }
        .instrument(span)
        .await
    }
}
