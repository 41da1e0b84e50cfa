//! Integration tests for the Vault KV v2 destination backend, against a
//! wiremock stand-in for the Vault HTTP API.

mod common;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use secretferry::secrets::{
    Secret, SecretDestination, SecretString, SecretsError, VaultKvClient, VaultKvConfig,
};
use secretferry::sync::write_if_allowed;
use secretferry::TransferOutcome;

use common::{mount_vault_metadata, mount_vault_write, vault_config, TEST_VAULT_TOKEN};

#[tokio::test]
async fn probe_confirms_existing_secret() {
    let server = MockServer::start().await;
    mount_vault_metadata(&server, "db-pass", 200).await;

    let client = VaultKvClient::new(vault_config(&server)).unwrap();
    assert!(client.secret_exists("db-pass").await);
}

#[tokio::test]
async fn probe_treats_every_non_success_as_absent() {
    let server = MockServer::start().await;
    mount_vault_metadata(&server, "missing", 404).await;
    mount_vault_metadata(&server, "forbidden", 403).await;
    mount_vault_metadata(&server, "broken", 500).await;

    let client = VaultKvClient::new(vault_config(&server)).unwrap();

    assert!(!client.secret_exists("missing").await);
    // Auth errors and server errors probe the same as not-found.
    assert!(!client.secret_exists("forbidden").await);
    assert!(!client.secret_exists("broken").await);
}

#[tokio::test]
async fn probe_sends_the_vault_token_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/secret/metadata/db-pass"))
        .and(header("X-Vault-Token", TEST_VAULT_TOKEN))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = VaultKvClient::new(vault_config(&server)).unwrap();
    assert!(client.secret_exists("db-pass").await);
}

#[tokio::test]
async fn write_posts_the_versioned_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/secret/data/db-pass"))
        .and(header("X-Vault-Token", TEST_VAULT_TOKEN))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "data": { "value": "s3cr3t" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "version": 1 } })))
        .expect(1)
        .mount(&server)
        .await;

    let client = VaultKvClient::new(vault_config(&server)).unwrap();
    client.write_secret("db-pass", &SecretString::new("s3cr3t")).await.unwrap();
}

#[tokio::test]
async fn write_failure_carries_the_status_code() {
    let server = MockServer::start().await;
    mount_vault_write(&server, "db-pass", 503).await;

    let client = VaultKvClient::new(vault_config(&server)).unwrap();
    let result = client.write_secret("db-pass", &SecretString::new("s3cr3t")).await;

    assert!(matches!(result, Err(SecretsError::UnexpectedStatus { status: 503, .. })));
}

#[tokio::test]
async fn existing_secret_is_not_written_when_overwrite_disabled() {
    let server = MockServer::start().await;
    mount_vault_metadata(&server, "db-pass", 200).await;

    Mock::given(method("POST"))
        .and(path("/v1/secret/data/db-pass"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = VaultKvClient::new(vault_config(&server)).unwrap();
    let secret = Secret::new("db-pass", "s3cr3t");

    let outcome = write_if_allowed(&client, &secret, false).await;
    assert_eq!(outcome, TransferOutcome::SkippedExisting { name: "db-pass".into() });
}

#[tokio::test]
async fn failed_probe_still_attempts_the_write() {
    let server = MockServer::start().await;
    // No metadata mock mounted: wiremock answers 404, probe says absent.
    mount_vault_write(&server, "db-pass", 200).await;

    let client = VaultKvClient::new(vault_config(&server)).unwrap();
    let secret = Secret::new("db-pass", "s3cr3t");

    let outcome = write_if_allowed(&client, &secret, false).await;
    assert_eq!(outcome, TransferOutcome::Written { name: "db-pass".into() });
}

#[tokio::test]
async fn unreachable_destination_becomes_a_write_failure() {
    // Nothing listens on this port; the probe reports absent and the write
    // then fails with a connection error, folded into the outcome.
    let config = VaultKvConfig {
        address: "http://127.0.0.1:9".to_string(),
        token: TEST_VAULT_TOKEN.into(),
        mount_path: "secret".to_string(),
        timeout_seconds: 2,
    };
    let client = VaultKvClient::new(config).unwrap();
    let secret = Secret::new("db-pass", "s3cr3t");

    let outcome = write_if_allowed(&client, &secret, false).await;
    assert!(matches!(outcome, TransferOutcome::WriteFailed { .. }));
}

#[test]
fn malformed_addresses_are_rejected_at_construction() {
    for address in ["", "not a url", "localhost:8200"] {
        let config = VaultKvConfig { address: address.to_string(), ..Default::default() };
        assert!(
            matches!(VaultKvClient::new(config), Err(SecretsError::ConfigError { .. })),
            "address '{}' should have been rejected",
            address
        );
    }
}
