//! Per-secret transfer outcomes and the pass summary.

use serde::Serialize;
use std::fmt;

/// The result of processing one secret during a sync pass.
///
/// Failures are values, not errors: nothing that happens to an individual
/// secret is allowed to unwind past the per-secret boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    /// The secret was written to the destination.
    Written { name: String },

    /// The secret exists at the destination and overwrite is disabled.
    SkippedExisting { name: String },

    /// The secret could not be read from the source.
    ReadFailed { name: String, reason: String },

    /// The secret could not be written to the destination.
    WriteFailed { name: String, reason: String },
}

impl TransferOutcome {
    /// Name of the secret this outcome belongs to.
    pub fn name(&self) -> &str {
        match self {
            Self::Written { name }
            | Self::SkippedExisting { name }
            | Self::ReadFailed { name, .. }
            | Self::WriteFailed { name, .. } => name,
        }
    }
}

impl fmt::Display for TransferOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Written { name } => write!(f, "wrote secret '{}' to destination", name),
            Self::SkippedExisting { name } => {
                write!(f, "skipped secret '{}': already exists at destination", name)
            }
            Self::ReadFailed { name, reason } => {
                write!(f, "failed to read secret '{}' from source: {}", name, reason)
            }
            Self::WriteFailed { name, reason } => {
                write!(f, "failed to write secret '{}' to destination: {}", name, reason)
            }
        }
    }
}

/// Aggregated counts for one sync pass. Reported, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PassSummary {
    /// Secrets successfully read from the source this pass.
    pub retrieved: usize,

    /// Secrets written to the destination.
    pub written: usize,

    /// Secrets skipped because they exist and overwrite is disabled.
    pub skipped_existing: usize,

    /// Secrets that could not be read from the source.
    pub read_failed: usize,

    /// Secrets that could not be written to the destination.
    pub write_failed: usize,
}

impl PassSummary {
    /// Count one outcome.
    pub fn record(&mut self, outcome: &TransferOutcome) {
        match outcome {
            TransferOutcome::Written { .. } => self.written += 1,
            TransferOutcome::SkippedExisting { .. } => self.skipped_existing += 1,
            TransferOutcome::ReadFailed { .. } => self.read_failed += 1,
            TransferOutcome::WriteFailed { .. } => self.write_failed += 1,
        }
    }

    /// Total per-secret failures in this pass.
    pub fn failures(&self) -> usize {
        self.read_failed + self.write_failed
    }
}
