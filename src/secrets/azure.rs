//! Azure Key Vault source backend.
//!
//! Talks to Key Vault's REST API directly: secrets are enumerated via the
//! paged `GET {vault}/secrets` listing and fetched one by one via
//! `GET {vault}/secrets/{name}`. Authentication uses the AAD
//! client-credentials flow (tenant + client id + client secret); the bearer
//! token is cached in-process and refreshed shortly before it expires.
//!
//! # Configuration
//!
//! - Vault URL (scheme defaults to https, trailing slash stripped)
//! - Tenant id, client id, client secret
//! - Optional authority host override for sovereign clouds
//!   (default: `https://login.microsoftonline.com`)

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use validator::Validate;

use super::error::{Result, SecretsError};
use super::source::SecretSource;
use super::types::SecretString;

/// Key Vault REST API version consumed by this client.
pub const KEY_VAULT_API_VERSION: &str = "7.4";

/// OAuth2 scope for Key Vault data-plane access.
const KEY_VAULT_SCOPE: &str = "https://vault.azure.net/.default";

const DEFAULT_AUTHORITY: &str = "https://login.microsoftonline.com";

/// Tokens within this margin of expiry are refreshed rather than reused.
const TOKEN_EXPIRY_SKEW: Duration = Duration::from_secs(60);

/// Configuration for the Azure Key Vault backend.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AzureKeyVaultConfig {
    /// Key Vault URL (e.g., "https://myvault.vault.azure.net").
    #[validate(length(min = 1, message = "Azure Key Vault URL cannot be empty"))]
    pub vault_url: String,

    /// AAD tenant id.
    pub tenant_id: String,

    /// AAD application (client) id.
    pub client_id: String,

    /// AAD client secret (redacted in logs).
    pub client_secret: SecretString,

    /// AAD authority host. Overridable for sovereign clouds.
    #[serde(default = "default_authority")]
    pub authority: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_authority() -> String {
    DEFAULT_AUTHORITY.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for AzureKeyVaultConfig {
    fn default() -> Self {
        Self {
            vault_url: String::new(),
            tenant_id: String::new(),
            client_id: String::new(),
            client_secret: SecretString::default(),
            authority: default_authority(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Normalize a Key Vault URL: default the scheme to https and strip any
/// trailing slash. An empty input stays empty so validation can reject it.
pub fn normalize_key_vault_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    with_scheme.trim_end_matches('/').to_string()
}

/// Extract the secret name from a listed secret identifier
/// (e.g., "https://myvault.vault.azure.net/secrets/db-pass").
pub(crate) fn secret_name_from_id(id: &str) -> Option<String> {
    id.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty() && *segment != "secrets")
        .map(str::to_string)
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_token_lifetime")]
    expires_in: u64,
}

fn default_token_lifetime() -> u64 {
    3600
}

struct CachedToken {
    token: SecretString,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        Instant::now() + TOKEN_EXPIRY_SKEW < self.expires_at
    }
}

#[derive(Debug, Deserialize)]
struct SecretListPage {
    #[serde(default)]
    value: Vec<SecretListItem>,
    #[serde(rename = "nextLink")]
    next_link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SecretListItem {
    id: String,
}

#[derive(Debug, Deserialize)]
struct SecretBundle {
    value: String,
}

/// Azure Key Vault client implementing [`SecretSource`].
pub struct AzureKeyVaultClient {
    http: reqwest::Client,
    config: AzureKeyVaultConfig,
    vault_url: String,
    token: Mutex<Option<CachedToken>>,
}

impl AzureKeyVaultClient {
    /// Create a new Key Vault client.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::ConfigError`] if the vault URL is empty
    /// - [`SecretsError::ConnectionFailed`] if the HTTP client cannot be built
    pub fn new(config: AzureKeyVaultConfig) -> Result<Self> {
        config.validate().map_err(|e| {
            SecretsError::config_error(format!("Invalid Azure Key Vault configuration: {}", e))
        })?;

        let vault_url = normalize_key_vault_url(&config.vault_url);
        if vault_url.is_empty() {
            return Err(SecretsError::config_error("Azure Key Vault URL cannot be empty"));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                SecretsError::connection_failed(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { http, vault_url, config, token: Mutex::new(None) })
    }

    /// Return a valid bearer token, refreshing the cached one when needed.
    async fn bearer_token(&self) -> Result<SecretString> {
        let mut guard = self.token.lock().await;
        if let Some(cached) = guard.as_ref() {
            if cached.is_fresh() {
                return Ok(cached.token.clone());
            }
        }

        let fresh = self.request_token().await?;
        let token = fresh.token.clone();
        *guard = Some(fresh);
        Ok(token)
    }

    async fn request_token(&self) -> Result<CachedToken> {
        let url = format!(
            "{}/{}/oauth2/v2.0/token",
            self.config.authority.trim_end_matches('/'),
            self.config.tenant_id
        );
        tracing::debug!(tenant_id = %self.config.tenant_id, "Requesting Key Vault access token");

        let response = self
            .http
            .post(&url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.expose_secret()),
                ("scope", KEY_VAULT_SCOPE),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SecretsError::authentication_failed(format!(
                "token endpoint returned status {}",
                status.as_u16()
            )));
        }

        let body: TokenResponse = response.json().await?;
        Ok(CachedToken {
            token: SecretString::new(body.access_token),
            expires_at: Instant::now() + Duration::from_secs(body.expires_in),
        })
    }
}

#[async_trait]
impl SecretSource for AzureKeyVaultClient {
    async fn list_secret_names(&self) -> Result<Vec<String>> {
        let token = self.bearer_token().await?;

        let mut names = Vec::new();
        let mut next =
            Some(format!("{}/secrets?api-version={}", self.vault_url, KEY_VAULT_API_VERSION));

        while let Some(url) = next {
            let response =
                self.http.get(&url).bearer_auth(token.expose_secret()).send().await?;

            let status = response.status();
            if !status.is_success() {
                return Err(SecretsError::unexpected_status(
                    status.as_u16(),
                    format!("listing secrets at '{}' failed", self.vault_url),
                ));
            }

            let page: SecretListPage = response.json().await?;
            for item in page.value {
                match secret_name_from_id(&item.id) {
                    Some(name) => names.push(name),
                    None => {
                        tracing::warn!(id = %item.id, "Skipping listed secret with unparseable identifier")
                    }
                }
            }
            next = page.next_link;
        }

        tracing::debug!(count = names.len(), vault_url = %self.vault_url, "Enumerated Key Vault secrets");
        Ok(names)
    }

    async fn get_secret_value(&self, name: &str) -> Result<SecretString> {
        let token = self.bearer_token().await?;
        let url =
            format!("{}/secrets/{}?api-version={}", self.vault_url, name, KEY_VAULT_API_VERSION);

        let response = self.http.get(&url).bearer_auth(token.expose_secret()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SecretsError::unexpected_status(
                status.as_u16(),
                format!("fetching secret '{}' failed", name),
            ));
        }

        let bundle: SecretBundle = response.json().await?;
        Ok(SecretString::new(bundle.value))
    }
}
