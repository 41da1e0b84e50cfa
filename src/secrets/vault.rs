//! HashiCorp Vault KV v2 destination backend.
//!
//! Consumes two endpoints of the KV v2 engine over plain HTTP with token
//! auth (`X-Vault-Token` header):
//!
//! - `GET v1/{mount}/metadata/{name}` as the existence probe (any 2xx means
//!   the secret exists)
//! - `POST v1/{mount}/data/{name}` with body `{"data": {"value": ...}}` as
//!   the create/update call (any 2xx means success)
//!
//! The probe deliberately treats every non-success answer, including
//! transport errors, as "does not exist". See the decision record in
//! DESIGN.md before changing that.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;
use validator::Validate;

use super::destination::SecretDestination;
use super::error::{Result, SecretsError};
use super::types::SecretString;

/// Default KV v2 mount path.
pub const DEFAULT_MOUNT_PATH: &str = "secret";

/// Configuration for the Vault KV v2 backend.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VaultKvConfig {
    /// Vault base address (e.g., "http://127.0.0.1:8200").
    #[validate(length(min = 1, message = "Vault address cannot be empty"), url(message = "Vault address must be an absolute URL"))]
    pub address: String,

    /// Vault authentication token (redacted in logs).
    pub token: SecretString,

    /// KV v2 mount path (default: "secret").
    #[serde(default = "default_mount_path")]
    pub mount_path: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_mount_path() -> String {
    DEFAULT_MOUNT_PATH.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for VaultKvConfig {
    fn default() -> Self {
        Self {
            address: "http://127.0.0.1:8200".to_string(),
            token: SecretString::default(),
            mount_path: default_mount_path(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Normalize a Vault base address so a trailing slash is always present.
/// An empty input stays empty so validation can reject it.
pub fn normalize_vault_address(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    }
}

/// KV v2 write payload: the secret value nested under Vault's `data` wrapper.
#[derive(Serialize)]
struct KvWriteRequest<'a> {
    data: KvWriteData<'a>,
}

#[derive(Serialize)]
struct KvWriteData<'a> {
    value: &'a str,
}

/// HashiCorp Vault client implementing [`SecretDestination`].
pub struct VaultKvClient {
    http: reqwest::Client,
    address: String,
    token: SecretString,
    mount_path: String,
}

impl VaultKvClient {
    /// Create a new Vault KV client.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::ConfigError`] if the address is not an absolute
    ///   http(s) URL
    /// - [`SecretsError::ConnectionFailed`] if the HTTP client cannot be built
    pub fn new(config: VaultKvConfig) -> Result<Self> {
        let address = normalize_vault_address(&config.address);
        let parsed = Url::parse(&address).map_err(|e| {
            SecretsError::config_error(format!(
                "Vault address '{}' is not an absolute URL: {}",
                config.address, e
            ))
        })?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(SecretsError::config_error(format!(
                "Vault address '{}' must be an absolute http(s) URL",
                config.address
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                SecretsError::connection_failed(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { http, address, token: config.token, mount_path: config.mount_path })
    }

    fn metadata_url(&self, name: &str) -> String {
        format!("{}v1/{}/metadata/{}", self.address, self.mount_path, name)
    }

    fn data_url(&self, name: &str) -> String {
        format!("{}v1/{}/data/{}", self.address, self.mount_path, name)
    }
}

#[async_trait]
impl SecretDestination for VaultKvClient {
    async fn secret_exists(&self, name: &str) -> bool {
        let request = self
            .http
            .get(self.metadata_url(name))
            .header("X-Vault-Token", self.token.expose_secret());

        match request.send().await {
            Ok(response) => {
                let exists = response.status().is_success();
                if !exists {
                    tracing::trace!(name = %name, status = response.status().as_u16(), "Existence probe did not confirm the secret");
                }
                exists
            }
            Err(err) => {
                tracing::debug!(name = %name, error = %err, "Existence probe failed, treating secret as absent");
                false
            }
        }
    }

    async fn write_secret(&self, name: &str, value: &SecretString) -> Result<()> {
        let payload = KvWriteRequest { data: KvWriteData { value: value.expose_secret() } };

        let response = self
            .http
            .post(self.data_url(name))
            .header("X-Vault-Token", self.token.expose_secret())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SecretsError::unexpected_status(
                status.as_u16(),
                format!("writing secret '{}' failed", name),
            ));
        }

        tracing::debug!(name = %name, mount_path = %self.mount_path, "Wrote secret to Vault");
        Ok(())
    }
}
