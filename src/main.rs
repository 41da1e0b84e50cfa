use clap::Parser;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::info;

use secretferry::{
    cli::Cli, observability::init_logging, AppConfig, Result, Scheduler, SyncEngine, APP_NAME,
    VERSION,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (optional - won't fail if missing)
    // This must happen before any config is read from environment
    if let Err(e) = dotenvy::dotenv() {
        if !e.to_string().contains("not found") {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json)?;

    let mut config = AppConfig::from_env()?;
    cli.apply_overrides(&mut config);

    info!(app_name = APP_NAME, version = VERSION, "Starting secret sync");
    info!(
        key_vault_url = %config.source.vault_url,
        vault_address = %config.destination.address,
        overwrite = config.sync.overwrite,
        schedule = config.sync.schedule.as_deref().unwrap_or("run once"),
        "Loaded configuration from environment"
    );

    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if signal::ctrl_c().await.is_ok() {
                info!("Shutdown signal received");
                shutdown.cancel();
            }
        });
    }

    let scheduler = Scheduler::new(SyncEngine::new(config), shutdown);
    scheduler.run().await?;

    info!("Secret sync shutdown completed");
    Ok(())
}
