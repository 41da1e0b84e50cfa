//! Shared helpers for integration tests.
//!
//! Both stores are stood in for by wiremock servers: one playing the AAD
//! token endpoint plus the Key Vault REST API, one playing Vault's KV v2
//! HTTP endpoints.

#![allow(dead_code)]

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use secretferry::config::{AppConfig, SyncSettings};
use secretferry::secrets::{AzureKeyVaultConfig, VaultKvConfig};

pub const TEST_TENANT: &str = "test-tenant";
pub const TEST_VAULT_TOKEN: &str = "unit-test-token";

/// Azure config pointing both the vault and the AAD authority at the mock.
pub fn azure_config(server: &MockServer) -> AzureKeyVaultConfig {
    AzureKeyVaultConfig {
        vault_url: server.uri(),
        tenant_id: TEST_TENANT.to_string(),
        client_id: "test-client".to_string(),
        client_secret: "test-client-secret".into(),
        authority: server.uri(),
        timeout_seconds: 5,
    }
}

/// Vault config pointing at the mock.
pub fn vault_config(server: &MockServer) -> VaultKvConfig {
    VaultKvConfig {
        address: server.uri(),
        token: TEST_VAULT_TOKEN.into(),
        mount_path: "secret".to_string(),
        timeout_seconds: 5,
    }
}

/// Full app config wired to the two mock servers.
pub fn app_config(azure: &MockServer, vault: &MockServer, overwrite: bool) -> AppConfig {
    AppConfig {
        source: azure_config(azure),
        destination: vault_config(vault),
        sync: SyncSettings { overwrite, schedule: None, request_timeout_seconds: 5 },
    }
}

/// Mount a happy-path AAD token endpoint.
pub async fn mount_token_endpoint(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(format!("/{}/oauth2/v2.0/token", TEST_TENANT)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token_type": "Bearer",
            "expires_in": 3600,
            "access_token": "test-access-token"
        })))
        .mount(server)
        .await;
}

/// Mount a single-page secret listing for the given names.
pub async fn mount_secret_listing(server: &MockServer, names: &[&str]) {
    let body = listing_page(server, names, None);
    Mock::given(method("GET"))
        .and(path("/secrets"))
        .and(query_param("api-version", "7.4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Build a listing page body; `next_link` chains to a follow-up page.
pub fn listing_page(
    server: &MockServer,
    names: &[&str],
    next_link: Option<&str>,
) -> serde_json::Value {
    let items: Vec<_> = names
        .iter()
        .map(|name| {
            json!({
                "id": format!("{}/secrets/{}", server.uri(), name),
                "attributes": { "enabled": true }
            })
        })
        .collect();

    match next_link {
        Some(link) => json!({ "value": items, "nextLink": link }),
        None => json!({ "value": items }),
    }
}

/// Mount a secret value fetch.
pub async fn mount_secret_value(server: &MockServer, name: &str, value: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/secrets/{}", name)))
        .and(query_param("api-version", "7.4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": value,
            "id": format!("{}/secrets/{}", server.uri(), name)
        })))
        .mount(server)
        .await;
}

/// Mount a failing secret value fetch with the given status.
pub async fn mount_secret_value_failure(server: &MockServer, name: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/secrets/{}", name)))
        .and(query_param("api-version", "7.4"))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Mount the Vault existence probe for one secret.
pub async fn mount_vault_metadata(server: &MockServer, name: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/secret/metadata/{}", name)))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({
            "data": { "current_version": 1 }
        })))
        .mount(server)
        .await;
}

/// Mount the Vault KV v2 write endpoint for one secret.
pub async fn mount_vault_write(server: &MockServer, name: &str, status: u16) {
    Mock::given(method("POST"))
        .and(path(format!("/v1/secret/data/{}", name)))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({
            "data": { "version": 1 }
        })))
        .mount(server)
        .await;
}
