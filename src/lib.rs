//! # secretferry
//!
//! One-way migration of secrets from Azure Key Vault into HashiCorp Vault's
//! KV v2 engine, either as a single pass or repeated once per day at a
//! configured local time.
//!
//! ## Architecture
//!
//! ```text
//! Scheduler → SyncEngine → SecretSource (bulk read)
//!                        → SecretDestination (probe + write, per secret)
//! ```
//!
//! ## Core Components
//!
//! - **SecretSource / AzureKeyVaultClient**: enumerates and fetches secrets
//!   over the Key Vault REST API, isolating per-secret read failures
//! - **SecretDestination / VaultKvClient**: existence probe and versioned
//!   write against Vault's KV v2 HTTP endpoints
//! - **SyncEngine**: one full pass, strictly sequential, aggregated into a
//!   [`PassSummary`]
//! - **Scheduler**: daily next-run computation and the long-lived control
//!   loop, with cooperative shutdown
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use secretferry::{AppConfig, Result, Scheduler, SyncEngine};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = AppConfig::from_env()?;
//!     let scheduler = Scheduler::new(SyncEngine::new(config), CancellationToken::new());
//!     scheduler.run().await
//! }
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod observability;
pub mod secrets;
pub mod sync;

// Re-export commonly used types
pub use config::AppConfig;
pub use errors::{FerryError, Result};
pub use sync::{PassSummary, Scheduler, SyncEngine, TransferOutcome};

/// Application name used in logs.
pub const APP_NAME: &str = "secretferry";

/// Application version from Cargo.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
