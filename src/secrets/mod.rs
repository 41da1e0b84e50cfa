//! Secret store integrations.
//!
//! The sync engine talks to stores through two narrow trait seams:
//! [`SecretSource`] (enumerate + fetch) and [`SecretDestination`] (probe +
//! write). The concrete backends are [`AzureKeyVaultClient`] for the source
//! and [`VaultKvClient`] for the destination; both hold a bounded-timeout
//! `reqwest` client and never retry on their own.
//!
//! Secret payloads travel as [`SecretString`], which redacts itself in logs,
//! errors, and serialized output.

pub mod azure;
pub mod destination;
pub mod error;
pub mod source;
pub mod types;
pub mod vault;

pub use azure::{AzureKeyVaultClient, AzureKeyVaultConfig};
pub use destination::SecretDestination;
pub use error::{Result, SecretsError};
pub use source::{fetch_all, SecretSource};
pub use types::{ReadFailure, Secret, SecretBatch, SecretString};
pub use vault::{VaultKvClient, VaultKvConfig};
