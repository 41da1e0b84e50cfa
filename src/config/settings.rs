//! # Configuration Settings
//!
//! Defines the configuration structure for the sync process. Values come
//! from `SECRETFERRY_*` environment variables (optionally via a `.env`
//! file); the CLI can override individual fields afterwards.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{FerryError, Result};
use crate::secrets::azure::{normalize_key_vault_url, AzureKeyVaultConfig};
use crate::secrets::vault::{normalize_vault_address, VaultKvConfig, DEFAULT_MOUNT_PATH};
use crate::secrets::SecretString;

/// Default per-request timeout against either store.
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct AppConfig {
    /// Source store (Azure Key Vault) configuration
    #[validate(nested)]
    pub source: AzureKeyVaultConfig,

    /// Destination store (HashiCorp Vault KV v2) configuration
    #[validate(nested)]
    pub destination: VaultKvConfig,

    /// Sync behavior configuration
    #[validate(nested)]
    pub sync: SyncSettings,
}

/// Sync behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SyncSettings {
    /// Overwrite secrets that already exist at the destination
    pub overwrite: bool,

    /// Daily sync time in HH:mm (local). Absent means run once.
    pub schedule: Option<String>,

    /// Per-request timeout in seconds
    #[validate(range(
        min = 1,
        max = 300,
        message = "Request timeout must be between 1 and 300 seconds"
    ))]
    pub request_timeout_seconds: u64,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            overwrite: false,
            schedule: None,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
        }
    }
}

impl AppConfig {
    /// Validate the entire configuration.
    ///
    /// Called at the start of every sync pass, before any store I/O.
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(FerryError::from)
    }

    /// Create configuration from environment variables.
    ///
    /// Missing store URLs and credentials are left empty here and rejected
    /// by per-pass validation, so a misconfigured recurring process keeps
    /// running and logging rather than crashing at load time.
    pub fn from_env() -> Result<Self> {
        let request_timeout_seconds = match std::env::var("SECRETFERRY_REQUEST_TIMEOUT_SECONDS") {
            Ok(raw) => raw.parse::<u64>().map_err(|e| {
                FerryError::config(format!("Invalid request timeout '{}': {}", raw, e))
            })?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECONDS,
        };

        let source = AzureKeyVaultConfig {
            vault_url: normalize_key_vault_url(
                &std::env::var("SECRETFERRY_AZURE_KEY_VAULT_URL").unwrap_or_default(),
            ),
            tenant_id: std::env::var("SECRETFERRY_AZURE_TENANT_ID").unwrap_or_default(),
            client_id: std::env::var("SECRETFERRY_AZURE_CLIENT_ID").unwrap_or_default(),
            client_secret: SecretString::new(
                std::env::var("SECRETFERRY_AZURE_CLIENT_SECRET").unwrap_or_default(),
            ),
            authority: std::env::var("SECRETFERRY_AZURE_AUTHORITY")
                .unwrap_or_else(|_| AzureKeyVaultConfig::default().authority),
            timeout_seconds: request_timeout_seconds,
        };

        let destination = VaultKvConfig {
            address: normalize_vault_address(
                &std::env::var("SECRETFERRY_VAULT_ADDR")
                    .unwrap_or_else(|_| "http://127.0.0.1:8200".to_string()),
            ),
            token: SecretString::new(std::env::var("SECRETFERRY_VAULT_TOKEN").unwrap_or_default()),
            mount_path: std::env::var("SECRETFERRY_VAULT_MOUNT_PATH")
                .unwrap_or_else(|_| DEFAULT_MOUNT_PATH.to_string()),
            timeout_seconds: request_timeout_seconds,
        };

        let overwrite = std::env::var("SECRETFERRY_OVERWRITE")
            .map(|s| s.to_lowercase() == "true" || s == "1")
            .unwrap_or(false);

        let schedule = std::env::var("SECRETFERRY_SCHEDULE")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(Self {
            source,
            destination,
            sync: SyncSettings { overwrite, schedule, request_timeout_seconds },
        })
    }
}
