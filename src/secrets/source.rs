//! Source store trait and the bulk read pass.

use async_trait::async_trait;

use super::error::Result;
use super::types::{Secret, SecretBatch, SecretString};

/// Read-only capability against a source secret store.
///
/// Implementations authenticate however their store requires and expose the
/// two operations the sync engine needs: name enumeration and value fetch.
/// Neither operation retries; one attempt per call.
#[async_trait]
pub trait SecretSource: Send + Sync {
    /// List all secret names currently visible to the credential.
    async fn list_secret_names(&self) -> Result<Vec<String>>;

    /// Fetch the current value of a single secret.
    async fn get_secret_value(&self, name: &str) -> Result<SecretString>;
}

/// Enumerate and fetch every secret the source exposes.
///
/// A listing failure is store-level and fails the whole pass. A per-secret
/// fetch failure is recorded in the batch and enumeration continues with the
/// next name; no retry is performed.
pub async fn fetch_all<S>(source: &S) -> Result<SecretBatch>
where
    S: SecretSource + ?Sized,
{
    let names = source.list_secret_names().await?;
    tracing::debug!(count = names.len(), "Enumerated secret names from source store");

    let mut batch = SecretBatch::default();
    for name in names {
        match source.get_secret_value(&name).await {
            Ok(value) => batch.insert(Secret { name, value }),
            Err(err) => {
                tracing::debug!(name = %name, error = %err, "Secret read failed, continuing enumeration");
                batch.record_read_failure(name, err.to_string());
            }
        }
    }

    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::error::SecretsError;

    struct ScriptedSource {
        names: Vec<&'static str>,
        failing: Vec<&'static str>,
        list_error: bool,
    }

    #[async_trait]
    impl SecretSource for ScriptedSource {
        async fn list_secret_names(&self) -> Result<Vec<String>> {
            if self.list_error {
                return Err(SecretsError::unexpected_status(500, "listing failed"));
            }
            Ok(self.names.iter().map(|n| n.to_string()).collect())
        }

        async fn get_secret_value(&self, name: &str) -> Result<SecretString> {
            if self.failing.contains(&name) {
                return Err(SecretsError::unexpected_status(403, format!("fetching secret '{}' failed", name)));
            }
            Ok(SecretString::new(format!("value-of-{}", name)))
        }
    }

    #[test]
    fn test_fetch_all_returns_every_secret() {
        let source =
            ScriptedSource { names: vec!["a", "b", "c"], failing: vec![], list_error: false };

        let batch = tokio_test::block_on(fetch_all(&source)).unwrap();
        assert_eq!(batch.len(), 3);
        assert!(batch.read_failures.is_empty());
        assert_eq!(batch.secrets[1].name, "b");
        assert_eq!(batch.secrets[1].value.expose_secret(), "value-of-b");
    }

    #[test]
    fn test_single_read_failure_does_not_abort_the_batch() {
        let source =
            ScriptedSource { names: vec!["first", "broken", "third"], failing: vec!["broken"], list_error: false };

        let batch = tokio_test::block_on(fetch_all(&source)).unwrap();

        let names: Vec<_> = batch.secrets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["first", "third"]);
        assert_eq!(batch.read_failures.len(), 1);
        assert_eq!(batch.read_failures[0].name, "broken");
        assert!(batch.read_failures[0].reason.contains("403"));
    }

    #[test]
    fn test_listing_failure_fails_the_pass() {
        let source = ScriptedSource { names: vec![], failing: vec![], list_error: true };

        let result = tokio_test::block_on(fetch_all(&source));
        assert!(matches!(result, Err(SecretsError::UnexpectedStatus { status: 500, .. })));
    }

    #[test]
    fn test_empty_source_yields_empty_batch() {
        let source = ScriptedSource { names: vec![], failing: vec![], list_error: false };

        let batch = tokio_test::block_on(fetch_all(&source)).unwrap();
        assert!(batch.is_empty());
        assert!(batch.read_failures.is_empty());
    }

    #[test]
    fn test_duplicate_names_keep_later_fetch() {
        let source =
            ScriptedSource { names: vec!["dup", "dup"], failing: vec![], list_error: false };

        let batch = tokio_test::block_on(fetch_all(&source)).unwrap();
        assert_eq!(batch.len(), 1);
    }
}
