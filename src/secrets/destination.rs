//! Destination store trait.

use async_trait::async_trait;

use super::error::Result;
use super::types::SecretString;

/// Write capability against a destination secret store.
#[async_trait]
pub trait SecretDestination: Send + Sync {
    /// Probe whether a secret already exists at the destination.
    ///
    /// Only a confirmed-present answer returns `true`. A probe that fails for
    /// any reason (not found, auth error, network error) returns `false` and
    /// the caller proceeds as if the secret were absent. This conflation is
    /// deliberate and matches the destination decision logic in
    /// [`crate::sync::engine::write_if_allowed`].
    async fn secret_exists(&self, name: &str) -> bool;

    /// Create or update a secret at the destination.
    async fn write_secret(&self, name: &str, value: &SecretString) -> Result<()>;
}
