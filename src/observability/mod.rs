//! Logging setup for the sync process.
//!
//! Uses the tracing ecosystem with an env-filter: `RUST_LOG` wins when set,
//! otherwise the verbosity flag picks the default level. JSON output is
//! available for log shippers.

use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::errors::{FerryError, Result};

/// Initialize the global tracing subscriber.
///
/// # Errors
///
/// Returns [`FerryError::Internal`] if a global subscriber is already set.
pub fn init_logging(verbose: bool, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "secretferry=debug,info" } else { "info" })
    });

    let result = if json {
        tracing::subscriber::set_global_default(
            FmtSubscriber::builder().with_env_filter(filter).json().finish(),
        )
    } else {
        tracing::subscriber::set_global_default(
            FmtSubscriber::builder().with_env_filter(filter).finish(),
        )
    };

    result.map_err(|e| FerryError::internal(format!("Failed to initialise logging: {}", e)))
}
