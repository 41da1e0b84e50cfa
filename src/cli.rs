//! # Command Line Interface
//!
//! Flags that override the environment-derived configuration.

use clap::Parser;

use crate::config::AppConfig;
use crate::secrets::azure::normalize_key_vault_url;
use crate::secrets::vault::normalize_vault_address;
use crate::secrets::SecretString;

#[derive(Debug, Parser)]
#[command(name = "secretferry")]
#[command(about = "Migrates secrets from Azure Key Vault into HashiCorp Vault's KV v2 engine")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Overwrite secrets that already exist at the destination
    #[arg(long)]
    pub overwrite: bool,

    /// Daily sync time in HH:mm (local time)
    #[arg(long)]
    pub schedule: Option<String>,

    /// Run a single pass even if a schedule is configured
    #[arg(long)]
    pub once: bool,

    /// Vault base address override
    #[arg(long)]
    pub vault_addr: Option<String>,

    /// Vault token override
    #[arg(long)]
    pub vault_token: Option<String>,

    /// Azure Key Vault URL override
    #[arg(long)]
    pub key_vault_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    /// Apply CLI overrides on top of the environment-derived configuration.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if self.overwrite {
            config.sync.overwrite = true;
        }
        if let Some(schedule) = &self.schedule {
            config.sync.schedule = Some(schedule.clone());
        }
        if self.once {
            config.sync.schedule = None;
        }
        if let Some(addr) = &self.vault_addr {
            config.destination.address = normalize_vault_address(addr);
        }
        if let Some(token) = &self.vault_token {
            config.destination.token = SecretString::new(token.clone());
        }
        if let Some(url) = &self.key_vault_url {
            config.source.vault_url = normalize_key_vault_url(url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_change_nothing() {
        let cli = Cli::try_parse_from(["secretferry"]).unwrap();
        let mut config = AppConfig::default();
        let before = format!("{:?}", config);

        cli.apply_overrides(&mut config);
        assert_eq!(format!("{:?}", config), before);
    }

    #[test]
    fn test_overrides_are_normalized() {
        let cli = Cli::try_parse_from([
            "secretferry",
            "--overwrite",
            "--vault-addr",
            "http://vault.internal:8200",
            "--key-vault-url",
            "myvault.vault.azure.net/",
        ])
        .unwrap();

        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);

        assert!(config.sync.overwrite);
        assert_eq!(config.destination.address, "http://vault.internal:8200/");
        assert_eq!(config.source.vault_url, "https://myvault.vault.azure.net");
    }

    #[test]
    fn test_once_clears_schedule() {
        let cli = Cli::try_parse_from(["secretferry", "--once"]).unwrap();

        let mut config = AppConfig::default();
        config.sync.schedule = Some("06:30".to_string());
        cli.apply_overrides(&mut config);

        assert!(config.sync.schedule.is_none());
    }
}
